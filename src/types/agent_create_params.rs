use serde::{Deserialize, Serialize};

use crate::types::Agent;

/// Default model for newly created agents.
pub const DEFAULT_MODEL: &str = "claude-opus-4.5";

/// Default model temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// Default agent priority.
pub const DEFAULT_PRIORITY: u32 = 10;

/// Connectors every new agent receives unless overridden.
pub const DEFAULT_CONNECTORS: &[&str] = &["edgedelta-mcp", "edgedelta-documentation"];

/// User prompt template the service expects on every agent.
const DEFAULT_USER_PROMPT: &str = "{{#if memory_context}}\n{{{ memory_context }}}\n\n---\n\n{{/if}}\n{{{ question }}}";

/// Parameters for creating (or fully replacing) an agent.
///
/// The service requires `masterPrompt` and `userPrompt` on every PUT, so
/// updates are read-modify-write: [`AgentCreateParams::from_agent`] seeds a
/// full payload from the current agent before changes are applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentCreateParams {
    /// Display name.
    pub name: String,

    /// Short description.
    pub description: String,

    /// Full system prompt.
    pub master_prompt: String,

    /// LLM model.
    pub model: String,

    /// Model temperature (0.0-1.0).
    pub model_temperature: f64,

    /// Agent status.
    pub status: String,

    /// Agent priority (1-10).
    pub priority: u32,

    /// Agent type.
    pub r#type: String,

    /// Capability tags.
    pub capabilities: Vec<String>,

    /// Connector names.
    pub connectors: Vec<String>,

    /// User prompt template.
    pub user_prompt: String,

    /// Role title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Avatar URL or identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl AgentCreateParams {
    /// Creates agent parameters with the service defaults.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        master_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            master_prompt: master_prompt.into(),
            model: DEFAULT_MODEL.to_string(),
            model_temperature: DEFAULT_TEMPERATURE,
            status: "active".to_string(),
            priority: DEFAULT_PRIORITY,
            r#type: "custom".to_string(),
            capabilities: Vec::new(),
            connectors: DEFAULT_CONNECTORS.iter().map(|c| c.to_string()).collect(),
            user_prompt: DEFAULT_USER_PROMPT.to_string(),
            role: None,
            avatar: None,
        }
    }

    /// Seeds a full payload from an existing agent, for read-modify-write
    /// updates and for cloning.
    pub fn from_agent(agent: &Agent) -> Self {
        Self {
            name: agent.name.clone(),
            description: agent.description.clone(),
            master_prompt: agent.master_prompt.clone(),
            model: agent.model.clone(),
            model_temperature: agent.model_temperature,
            status: if agent.status.is_empty() {
                "active".to_string()
            } else {
                agent.status.clone()
            },
            priority: agent.priority,
            r#type: "custom".to_string(),
            capabilities: agent.capabilities.clone(),
            connectors: agent.connectors.clone(),
            user_prompt: if agent.user_prompt.is_empty() {
                DEFAULT_USER_PROMPT.to_string()
            } else {
                agent.user_prompt.clone()
            },
            role: agent.role.clone(),
            avatar: agent.avatar.clone(),
        }
    }

    /// Sets the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the role title.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Sets the avatar.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Sets the model temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.model_temperature = temperature;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Replaces the connector list.
    pub fn with_connectors(mut self, connectors: Vec<String>) -> Self {
        self.connectors = connectors;
        self
    }

    /// Replaces the capability list.
    pub fn with_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.capabilities = capabilities;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_expectations() {
        let params = AgentCreateParams::new("Recon", "recon agent", "You are Recon.");
        assert_eq!(params.model, DEFAULT_MODEL);
        assert_eq!(params.status, "active");
        assert_eq!(params.r#type, "custom");
        assert_eq!(params.connectors.len(), 2);
        assert!(params.user_prompt.contains("{{{ question }}}"));

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["masterPrompt"], "You are Recon.");
        assert_eq!(json["modelTemperature"], 0.1);
        assert!(json.get("role").is_none());
    }

    #[test]
    fn builders_override_defaults() {
        let params = AgentCreateParams::new("X", "d", "p")
            .with_model("gpt-5.2")
            .with_role("Security Specialist")
            .with_temperature(0.3)
            .with_priority(5);
        assert_eq!(params.model, "gpt-5.2");
        assert_eq!(params.role.as_deref(), Some("Security Specialist"));
        assert_eq!(params.model_temperature, 0.3);
        assert_eq!(params.priority, 5);
    }
}
