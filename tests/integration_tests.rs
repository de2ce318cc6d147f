//! Integration tests for the aiteam library.
//! These tests require ED_ORG_ID and ED_JWT in the environment to run.

#[cfg(test)]
mod tests {
    use aiteam::{AiTeam, ClientOptions};

    fn credentials() -> Option<(String, String)> {
        let org_id = std::env::var("ED_ORG_ID").ok()?;
        let jwt = std::env::var("ED_JWT").ok()?;
        Some((org_id, jwt))
    }

    #[tokio::test]
    async fn test_list_agents() {
        let Some((org_id, jwt)) = credentials() else {
            eprintln!("Skipping test: ED_ORG_ID/ED_JWT not set");
            return;
        };

        let client = AiTeam::new(org_id, Some(jwt)).expect("Failed to create client");
        let agents = client.list_agents().await;
        assert!(agents.is_ok(), "Request should succeed with a valid JWT");
        assert!(
            !agents.unwrap().is_empty(),
            "Organization should have built-in agents"
        );
    }

    #[tokio::test]
    async fn test_list_channels() {
        let Some((org_id, jwt)) = credentials() else {
            eprintln!("Skipping test: ED_ORG_ID/ED_JWT not set");
            return;
        };

        let client = AiTeam::new(org_id, Some(jwt)).expect("Failed to create client");
        let channels = client.list_channels().await;
        assert!(channels.is_ok(), "Request should succeed with a valid JWT");
    }

    #[tokio::test]
    async fn test_list_models_requires_api_token() {
        let Some((org_id, jwt)) = credentials() else {
            eprintln!("Skipping test: ED_ORG_ID/ED_JWT not set");
            return;
        };

        let api_token = std::env::var("ED_API_TOKEN").ok();
        let has_token = api_token.is_some();
        let client = AiTeam::with_options(
            org_id,
            Some(jwt),
            ClientOptions {
                api_token,
                ..ClientOptions::default()
            },
        )
        .expect("Failed to create client");

        let models = client.list_models().await;
        if has_token {
            assert!(models.is_ok(), "Request should succeed with an API token");
        } else {
            assert!(
                models.unwrap_err().is_authentication(),
                "Missing API token should fail before any network call"
            );
        }
    }
}
