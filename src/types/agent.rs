use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An AI teammate registered in the organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Opaque agent identifier (UUID for custom agents, short alias for
    /// built-ins like `sre`).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description of what the agent does.
    #[serde(default)]
    pub description: String,

    /// LLM model backing the agent.
    #[serde(default)]
    pub model: String,

    /// Agent status (`active` or `inactive`).
    #[serde(default)]
    pub status: String,

    /// Agent type (`custom` for user-created agents).
    #[serde(default)]
    pub r#type: String,

    /// Role title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Avatar URL or identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Full system prompt.
    #[serde(default)]
    pub master_prompt: String,

    /// User prompt template.
    #[serde(default)]
    pub user_prompt: String,

    /// Model temperature.
    #[serde(default)]
    pub model_temperature: f64,

    /// Agent priority (1-10).
    #[serde(default)]
    pub priority: u32,

    /// Capability tags.
    #[serde(default)]
    pub capabilities: Vec<String>,

    /// Connector names assigned to the agent.
    #[serde(default)]
    pub connectors: Vec<String>,

    /// MCP tools assigned to the agent. The service returns either a flat
    /// list or a map keyed by connector name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_configurations: Option<ToolConfigurations>,
}

impl Agent {
    /// Returns the agent's assigned tools as a flat list, regardless of
    /// which shape the service returned.
    pub fn tools(&self) -> Vec<AgentTool> {
        match &self.tool_configurations {
            Some(ToolConfigurations::List(tools)) => tools.clone(),
            Some(ToolConfigurations::ByConnector(map)) => map
                .iter()
                .flat_map(|(connector, group)| {
                    group.configurations.iter().map(|cfg| AgentTool {
                        tool_name: cfg.name.clone(),
                        description: cfg.description.clone(),
                        connector: connector.clone(),
                        status: cfg.status.clone(),
                    })
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Either shape the service uses for an agent's tool assignments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ToolConfigurations {
    /// Flat list of tools.
    List(Vec<AgentTool>),

    /// Tools grouped by connector name.
    ByConnector(BTreeMap<String, ConnectorTools>),
}

/// One MCP tool assigned to an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentTool {
    /// Tool name.
    #[serde(default)]
    pub tool_name: String,

    /// Tool description.
    #[serde(default)]
    pub description: String,

    /// Connector the tool belongs to.
    #[serde(default)]
    pub connector: String,

    /// Tool status.
    #[serde(default = "default_tool_status")]
    pub status: String,
}

/// Tool configurations grouped under a single connector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectorTools {
    /// The tools this connector provides to the agent.
    #[serde(default)]
    pub configurations: Vec<ConnectorToolConfig>,
}

/// One tool entry in the connector-keyed shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectorToolConfig {
    /// Tool name.
    #[serde(default)]
    pub name: String,

    /// Tool description.
    #[serde(default)]
    pub description: String,

    /// Tool status.
    #[serde(default = "default_tool_status")]
    pub status: String,
}

fn default_tool_status() -> String {
    "active".to_string()
}
