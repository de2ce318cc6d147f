//! HTTP client for the AI Team service.
//!
//! The service spans three API surfaces: the chat surface (threads,
//! messages, channels, activity), the agent/config surface (agents,
//! integrations), and the main surface (models, connectors). The first two
//! authenticate with a bearer token, the main surface with an API token.
//! Every method here is a direct request/response mapping; the only
//! stateful logic in the crate lives in [`crate::roundtrip`].

use std::env;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, Response, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{
    ActivityItem, Agent, AgentCreateParams, AgentTool, AgentUpdate, BadgeCount, Channel,
    Integration, IntegrationCreateParams, Message, ModelEntry, ModelListResponse, Thread,
    ThreadCreateParams, ThreadState,
};

/// Default base URL for the chat surface.
pub const DEFAULT_CHAT_URL: &str = "https://chat.ai.edgedelta.com/v1";

/// Default base URL for the agent/config surface.
pub const DEFAULT_AGENT_URL: &str = "https://agent.ai.edgedelta.com/v1";

/// Default base URL for the main surface.
pub const DEFAULT_MAIN_URL: &str = "https://api.edgedelta.com/v1";

/// Message-fetch bound used when inlining messages into a thread fetch.
///
/// The service paginates by default; a generously high bound avoids a second
/// round trip in the common case.
pub const DEFAULT_MESSAGE_LIMIT: u32 = 10_000;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Optional settings for [`AiTeam::with_options`].
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Override for the chat surface base URL.
    pub chat_url: Option<String>,

    /// Override for the agent/config surface base URL.
    pub agent_url: Option<String>,

    /// Override for the main surface base URL.
    pub main_url: Option<String>,

    /// API token for the main surface (models, connectors).
    pub api_token: Option<String>,

    /// Per-request HTTP timeout.
    pub timeout: Option<Duration>,
}

/// Client for the AI Team service.
#[derive(Debug, Clone)]
pub struct AiTeam {
    org_id: String,
    bearer: String,
    api_token: Option<String>,
    client: ReqwestClient,
    chat_url: String,
    agent_url: String,
    main_url: String,
    timeout: Duration,
}

impl AiTeam {
    /// Create a new client for an organization.
    ///
    /// The bearer token can be provided directly or read from the ED_JWT
    /// environment variable.
    pub fn new(org_id: impl Into<String>, bearer: Option<String>) -> Result<Self> {
        Self::with_options(org_id, bearer, ClientOptions::default())
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        org_id: impl Into<String>,
        bearer: Option<String>,
        options: ClientOptions,
    ) -> Result<Self> {
        let bearer = match bearer {
            Some(token) => token,
            None => env::var("ED_JWT").map_err(|_| {
                Error::authentication(
                    "bearer token not provided and ED_JWT environment variable not set",
                )
            })?,
        };

        let timeout = options.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            org_id: org_id.into(),
            bearer,
            api_token: options.api_token,
            client,
            chat_url: options
                .chat_url
                .unwrap_or_else(|| DEFAULT_CHAT_URL.to_string()),
            agent_url: options
                .agent_url
                .unwrap_or_else(|| DEFAULT_AGENT_URL.to_string()),
            main_url: options
                .main_url
                .unwrap_or_else(|| DEFAULT_MAIN_URL.to_string()),
            timeout,
        })
    }

    /// Returns the organization identifier this client is bound to.
    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    fn chat_url(&self, path: &str) -> String {
        format!("{}/orgs/{}{}", self.chat_url, self.org_id, path)
    }

    fn agent_url(&self, path: &str) -> String {
        format!("{}/orgs/{}{}", self.agent_url, self.org_id, path)
    }

    fn main_url(&self, path: &str) -> String {
        format!("{}/orgs/{}{}", self.main_url, self.org_id, path)
    }

    /// Headers for the chat and agent surfaces (bearer auth).
    fn bearer_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.bearer))
                .expect("bearer token should be a valid header value"),
        );
        headers
    }

    /// Headers for the main surface (API-token auth).
    fn api_headers(&self) -> Result<HeaderMap> {
        let api_token = self.api_token.as_deref().ok_or_else(|| {
            Error::authentication(
                "API token required for this endpoint; set ED_API_TOKEN or pass --api-token",
            )
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            "X-ED-API-Token",
            HeaderValue::from_str(api_token)
                .expect("API token should be a valid header value"),
        );
        Ok(headers)
    }

    async fn request_value(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<Value>,
    ) -> Result<Value> {
        CLIENT_REQUESTS.click();
        let start = Instant::now();

        let mut request = self.client.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.map_err(|e| {
            CLIENT_REQUEST_ERRORS.click();
            map_send_error(e, self.timeout)
        })?;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        if !response.status().is_success() {
            CLIENT_REQUEST_ERRORS.click();
            return Err(process_error_response(response).await);
        }

        response.json::<Value>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Issues a request and deserializes the payload, unwrapping the
    /// service's `{"data": ...}` envelope when present.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<Value>,
    ) -> Result<T> {
        let value = self.request_value(method, url, headers, body).await?;
        from_data(value)
    }

    /// Issues a request where only the status matters (deletes, mark-read).
    async fn request_unit(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
    ) -> Result<()> {
        CLIENT_REQUESTS.click();
        let start = Instant::now();

        let response = self
            .client
            .request(method, &url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                CLIENT_REQUEST_ERRORS.click();
                map_send_error(e, self.timeout)
            })?;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        if !response.status().is_success() {
            CLIENT_REQUEST_ERRORS.click();
            return Err(process_error_response(response).await);
        }
        Ok(())
    }

    // ── Agents ──────────────────────────────────────────────

    /// List all agents in the organization.
    pub async fn list_agents(&self) -> Result<Vec<Agent>> {
        self.request(
            Method::GET,
            self.agent_url("/agents"),
            self.bearer_headers(),
            None,
        )
        .await
    }

    /// Get a specific agent by ID or short alias.
    pub async fn get_agent(&self, agent_id: &str) -> Result<Agent> {
        let agents = self.list_agents().await?;
        agents
            .into_iter()
            .find(|a| a.id == agent_id)
            .ok_or_else(|| {
                Error::not_found(
                    format!("agent '{agent_id}' not found"),
                    Some("agent".to_string()),
                    Some(agent_id.to_string()),
                )
            })
    }

    /// Create a new custom agent.
    pub async fn create_agent(&self, params: AgentCreateParams) -> Result<Agent> {
        self.request(
            Method::POST,
            self.agent_url("/agents"),
            self.bearer_headers(),
            Some(serde_json::to_value(&params)?),
        )
        .await
    }

    /// Update an existing agent.
    ///
    /// The service requires the full prompt fields on every PUT, so this is
    /// read-modify-write: the current agent seeds the payload and the update
    /// is applied on top.
    pub async fn update_agent(&self, agent_id: &str, update: AgentUpdate) -> Result<Agent> {
        let current = self.get_agent(agent_id).await?;
        let payload = update.apply(AgentCreateParams::from_agent(&current));
        let value = self
            .request_value(
                Method::PUT,
                self.agent_url(&format!("/agents/{agent_id}")),
                self.bearer_headers(),
                Some(serde_json::to_value(&payload)?),
            )
            .await?;
        // Some deployments return an empty body on PUT; re-fetch in that case.
        match from_data::<Agent>(value) {
            Ok(agent) => Ok(agent),
            Err(_) => self.get_agent(agent_id).await,
        }
    }

    /// Delete a custom agent.
    pub async fn delete_agent(&self, agent_id: &str) -> Result<()> {
        self.request_unit(
            Method::DELETE,
            self.agent_url(&format!("/agents/{agent_id}")),
            self.bearer_headers(),
        )
        .await
    }

    /// Clone an existing agent under a new name.
    ///
    /// Copies the source agent's full configuration and applies any
    /// overrides before creating the copy.
    pub async fn clone_agent(
        &self,
        agent_id: &str,
        new_name: &str,
        overrides: AgentUpdate,
    ) -> Result<Agent> {
        let source = self.get_agent(agent_id).await?;
        let mut params = overrides.apply(AgentCreateParams::from_agent(&source));
        params.name = new_name.to_string();
        self.create_agent(params).await
    }

    /// Get the MCP tools assigned to an agent, as a flat list.
    pub async fn agent_tools(&self, agent_id: &str) -> Result<Vec<AgentTool>> {
        Ok(self.get_agent(agent_id).await?.tools())
    }

    // ── Channels ────────────────────────────────────────────

    /// List all channels and DMs.
    pub async fn list_channels(&self) -> Result<Vec<Channel>> {
        self.request(
            Method::GET,
            self.chat_url("/channels"),
            self.bearer_headers(),
            None,
        )
        .await
    }

    /// Get a specific channel.
    pub async fn get_channel(&self, channel_id: &str) -> Result<Channel> {
        self.request(
            Method::GET,
            self.chat_url(&format!("/channels/{channel_id}")),
            self.bearer_headers(),
            None,
        )
        .await
    }

    // ── Threads & messages ──────────────────────────────────

    /// Create a new thread in a channel; the params' title is the opening
    /// message.
    pub async fn create_thread(
        &self,
        channel_id: &str,
        params: ThreadCreateParams,
    ) -> Result<Thread> {
        self.request(
            Method::POST,
            self.chat_url(&format!("/channels/{channel_id}/threads")),
            self.bearer_headers(),
            Some(serde_json::to_value(&params)?),
        )
        .await
    }

    /// Fetch a thread, inlining up to `message_limit` messages.
    pub async fn get_thread(
        &self,
        channel_id: &str,
        thread_id: &str,
        message_limit: u32,
    ) -> Result<Thread> {
        self.request(
            Method::GET,
            self.chat_url(&format!(
                "/channels/{channel_id}/threads/{thread_id}?messageLimit={message_limit}"
            )),
            self.bearer_headers(),
            None,
        )
        .await
    }

    /// Fetch the messages of a thread via the dedicated listing endpoint.
    pub async fn get_thread_messages(
        &self,
        channel_id: &str,
        thread_id: &str,
    ) -> Result<Vec<Message>> {
        self.request(
            Method::GET,
            self.chat_url(&format!("/channels/{channel_id}/threads/{thread_id}/messages")),
            self.bearer_headers(),
            None,
        )
        .await
    }

    /// List recent threads in a channel.
    pub async fn list_threads(&self, channel_id: &str, limit: u32) -> Result<Vec<Thread>> {
        self.request(
            Method::GET,
            self.chat_url(&format!(
                "/channels/{channel_id}/threads?limit={limit}&messageLimit={DEFAULT_MESSAGE_LIMIT}"
            )),
            self.bearer_headers(),
            None,
        )
        .await
    }

    /// Mark a thread as read.
    pub async fn mark_thread_read(&self, channel_id: &str, thread_id: &str) -> Result<()> {
        self.request_unit(
            Method::POST,
            self.chat_url(&format!("/channels/{channel_id}/threads/{thread_id}/mark-read")),
            self.bearer_headers(),
        )
        .await
    }

    // ── Activity ────────────────────────────────────────────

    /// Get the activity feed, sorted by last activity.
    pub async fn activity(
        &self,
        limit: u32,
        lookback: Option<&str>,
        channel_id: Option<&str>,
    ) -> Result<Vec<ActivityItem>> {
        let mut params = format!("limit={limit}&sort=last-activity");
        if let Some(lookback) = lookback {
            params.push_str(&format!("&lookback={lookback}"));
        }
        if let Some(channel_id) = channel_id {
            params.push_str(&format!("&channelId={channel_id}"));
        }
        self.request(
            Method::GET,
            self.chat_url(&format!("/activity?{params}")),
            self.bearer_headers(),
            None,
        )
        .await
    }

    /// Get the aggregate unread badge count.
    pub async fn badge_count(&self, lookback: &str) -> Result<BadgeCount> {
        self.request(
            Method::GET,
            self.chat_url(&format!("/activity/aggregate-badge-count?lookback={lookback}")),
            self.bearer_headers(),
            None,
        )
        .await
    }

    /// Search threads across all channels, optionally filtering by state.
    ///
    /// The service has no dedicated search endpoint; this filters the
    /// activity feed client-side.
    pub async fn search_threads(
        &self,
        lookback: &str,
        state: Option<&ThreadState>,
        limit: u32,
    ) -> Result<Vec<ActivityItem>> {
        let activities = self.activity(limit, Some(lookback), None).await?;
        Ok(match state {
            Some(state) => activities
                .into_iter()
                .filter(|a| a.state == *state)
                .collect(),
            None => activities,
        })
    }

    // ── Main surface (API-token auth) ───────────────────────

    /// List available AI models.
    pub async fn list_models(&self) -> Result<Vec<ModelEntry>> {
        let value = self
            .request_value(
                Method::GET,
                self.main_url("/ai/models"),
                self.api_headers()?,
                None,
            )
            .await?;
        let resp: ModelListResponse = serde_json::from_value(value)?;
        Ok(resp.models)
    }

    /// List available connectors.
    ///
    /// The response shape varies by deployment, so the raw JSON is returned.
    pub async fn list_connectors(&self) -> Result<Value> {
        self.request_value(
            Method::GET,
            self.main_url("/ai/connectors"),
            self.api_headers()?,
            None,
        )
        .await
    }

    // ── Integrations ────────────────────────────────────────

    /// List all integrations (connectors) via the agent surface.
    pub async fn list_integrations(&self) -> Result<Vec<Integration>> {
        self.request(
            Method::GET,
            self.agent_url("/integrations?visibleFields="),
            self.bearer_headers(),
            None,
        )
        .await
    }

    /// Create a new integration.
    pub async fn create_integration(
        &self,
        params: IntegrationCreateParams,
    ) -> Result<Integration> {
        self.request(
            Method::POST,
            self.agent_url("/integrations"),
            self.bearer_headers(),
            Some(serde_json::to_value(&params)?),
        )
        .await
    }

    /// Delete an integration by name.
    pub async fn delete_integration(&self, name: &str) -> Result<()> {
        self.request_unit(
            Method::DELETE,
            self.agent_url(&format!("/integrations/{name}")),
            self.bearer_headers(),
        )
        .await
    }
}

/// Deserializes a payload, unwrapping the `{"data": ...}` envelope when the
/// response carries one.
fn from_data<T: DeserializeOwned>(mut value: Value) -> Result<T> {
    let inner = match value.get_mut("data") {
        Some(data) => data.take(),
        None => value,
    };
    serde_json::from_value(inner).map_err(Error::from)
}

/// Converts a reqwest send error into our error type.
pub(crate) fn map_send_error(e: reqwest::Error, timeout: Duration) -> Error {
    if e.is_timeout() {
        Error::timeout(
            format!("Request timed out: {}", e),
            Some(timeout.as_secs_f64()),
        )
    } else if e.is_connect() {
        Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
    } else {
        Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
    }
}

/// Process API response errors and convert to our Error type
pub(crate) async fn process_error_response(response: Response) -> Error {
    let status = response.status();
    let status_code = status.as_u16();

    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .map(String::from);

    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|val| val.to_str().ok())
        .and_then(|val| val.parse::<u64>().ok());

    // Try to parse error response body
    #[derive(Deserialize)]
    struct ErrorResponse {
        error: Option<ErrorDetail>,
        message: Option<String>,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        message: Option<String>,
        param: Option<String>,
    }

    let error_body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            return Error::http_client(
                format!("Failed to read error response: {}", e),
                Some(Box::new(e)),
            );
        }
    };

    let parsed = serde_json::from_str::<ErrorResponse>(&error_body).ok();
    let error_message = parsed
        .as_ref()
        .and_then(|e| {
            e.error
                .as_ref()
                .and_then(|d| d.message.clone())
                .or_else(|| e.message.clone())
        })
        .unwrap_or_else(|| error_body.clone());
    let error_param = parsed
        .as_ref()
        .and_then(|e| e.error.as_ref())
        .and_then(|d| d.param.clone());

    match status_code {
        400 => Error::bad_request(error_message, error_param),
        401 => Error::authentication(error_message),
        403 => Error::permission(error_message),
        404 => Error::not_found(error_message, None, None),
        408 => Error::timeout(error_message, None),
        429 => Error::rate_limit(error_message, retry_after),
        500 => Error::internal_server(error_message, request_id),
        502..=504 => Error::service_unavailable(error_message, retry_after),
        _ => Error::api(status_code, error_message, request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = AiTeam::new("org-1", Some("test-jwt".to_string())).unwrap();
        assert_eq!(client.org_id(), "org-1");
        assert_eq!(client.chat_url, DEFAULT_CHAT_URL);
        assert_eq!(client.agent_url, DEFAULT_AGENT_URL);
        assert_eq!(client.main_url, DEFAULT_MAIN_URL);
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);

        let client = AiTeam::with_options(
            "org-2",
            Some("test-jwt".to_string()),
            ClientOptions {
                chat_url: Some("http://localhost:9000/v1".to_string()),
                timeout: Some(Duration::from_secs(5)),
                ..ClientOptions::default()
            },
        )
        .unwrap();
        assert_eq!(client.chat_url, "http://localhost:9000/v1");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn url_builders_scope_to_org() {
        let client = AiTeam::new("org-1", Some("jwt".to_string())).unwrap();
        assert_eq!(
            client.chat_url("/channels"),
            "https://chat.ai.edgedelta.com/v1/orgs/org-1/channels"
        );
        assert_eq!(
            client.agent_url("/agents"),
            "https://agent.ai.edgedelta.com/v1/orgs/org-1/agents"
        );
    }

    #[test]
    fn api_headers_require_token() {
        let client = AiTeam::new("org-1", Some("jwt".to_string())).unwrap();
        assert!(client.api_headers().unwrap_err().is_authentication());

        let client = AiTeam::with_options(
            "org-1",
            Some("jwt".to_string()),
            ClientOptions {
                api_token: Some("tok".to_string()),
                ..ClientOptions::default()
            },
        )
        .unwrap();
        assert!(client.api_headers().is_ok());
    }

    #[test]
    fn from_data_unwraps_envelope_when_present() {
        let wrapped: Vec<u32> = from_data(serde_json::json!({"data": [1, 2]})).unwrap();
        assert_eq!(wrapped, vec![1, 2]);
        let bare: Vec<u32> = from_data(serde_json::json!([3])).unwrap();
        assert_eq!(bare, vec![3]);
    }
}
