use serde::{Deserialize, Serialize};

/// A connector/integration registered in the organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    /// Unique integration name.
    pub name: String,

    /// Human-readable display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Connector spec type (`custom-mcp`, `slack`, `sentry`, ...).
    #[serde(default)]
    pub r#type: String,

    /// Legacy connector flag.
    #[serde(default)]
    pub is_legacy: bool,

    /// Connection status reported by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_connector_connection_status: Option<String>,

    /// Who created the integration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    /// Authentication configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_data: Option<AuthData>,
}

/// Authentication configuration for an integration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    /// Authentication type (`none`, `token`, `oAuth`).
    #[serde(default)]
    pub auth_type: String,

    /// MCP server URL (for `custom-mcp` connectors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// Bearer token (when `auth_type` is `token`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Parameters for creating an integration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationCreateParams {
    /// Connector spec type.
    pub r#type: String,

    /// Unique integration name.
    pub name: String,

    /// Human-readable display name.
    pub display_name: String,

    /// Legacy connector flag, always false for new integrations.
    pub is_legacy: bool,

    /// Authentication configuration.
    pub authentication_data: AuthData,
}

impl IntegrationCreateParams {
    /// Creates integration parameters; the display name defaults to the
    /// integration name.
    pub fn new(
        connector_type: impl Into<String>,
        name: impl Into<String>,
        display_name: Option<String>,
        auth_data: AuthData,
    ) -> Self {
        let name = name.into();
        Self {
            r#type: connector_type.into(),
            display_name: display_name.unwrap_or_else(|| name.clone()),
            name,
            is_legacy: false,
            authentication_data: auth_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_params_wire_shape() {
        let params = IntegrationCreateParams::new(
            "custom-mcp",
            "my-mcp",
            None,
            AuthData {
                auth_type: "token".to_string(),
                server_url: Some("https://mcp.example.com".to_string()),
                token: Some("secret".to_string()),
            },
        );
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["type"], "custom-mcp");
        assert_eq!(json["displayName"], "my-mcp");
        assert_eq!(json["isLegacy"], false);
        assert_eq!(json["authenticationData"]["authType"], "token");
        assert_eq!(
            json["authenticationData"]["serverUrl"],
            "https://mcp.example.com"
        );
    }
}
