//! MCP tool definitions for the AI Team surface.
//!
//! Pure data: one [`ToolDefinition`] per exposed operation, in the schema
//! format an MCP server registers tools with. Hosting the tools is a server
//! concern; nothing here performs a call.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A single MCP tool declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    /// Tool name, prefixed `ai_team_`.
    pub name: String,

    /// Human-readable description shown to the model.
    pub description: String,

    /// JSON schema for the tool's arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

fn no_args() -> Value {
    json!({"type": "object", "properties": {}, "required": []})
}

/// All AI Team tool definitions, in registration order.
pub fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "ai_team_list_agents",
            "List all AI Team agents in the organization. Returns agent names, IDs, models, status, and types.",
            no_args(),
        ),
        ToolDefinition::new(
            "ai_team_get_agent",
            "Get detailed information about a specific AI Team agent including its system prompt, model, connectors, and tool configurations.",
            json!({
                "type": "object",
                "properties": {
                    "agent_id": {
                        "type": "string",
                        "description": "The agent ID (UUID or short name like 'sre', 'security-engineer')",
                    },
                },
                "required": ["agent_id"],
            }),
        ),
        ToolDefinition::new(
            "ai_team_create_agent",
            "Create a new custom AI Team agent with specified name, model, system prompt, and connectors. The agent will automatically be assigned EdgeDelta MCP tools.",
            json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Display name for the agent (e.g., 'Log Analyzer')",
                    },
                    "description": {
                        "type": "string",
                        "description": "Short description of what the agent does",
                    },
                    "system_prompt": {
                        "type": "string",
                        "description": "Full system prompt / master prompt with agent instructions",
                    },
                    "model": {
                        "type": "string",
                        "description": "LLM model to use. Options: claude-opus-4-5-20250414, gpt-5.2, mistral-large-latest, llama-3-70b",
                        "default": "claude-opus-4-5-20250414",
                    },
                    "role": {
                        "type": "string",
                        "description": "Role title (e.g., 'Security Specialist')",
                    },
                    "connectors": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Connector names (default: edgedelta-mcp, edgedelta-documentation)",
                    },
                    "temperature": {
                        "type": "number",
                        "description": "Model temperature 0.0-1.0 (default: 0.1)",
                        "default": 0.1,
                    },
                },
                "required": ["name", "description", "system_prompt"],
            }),
        ),
        ToolDefinition::new(
            "ai_team_update_agent",
            "Update an existing AI Team agent's configuration. Only provide fields you want to change.",
            json!({
                "type": "object",
                "properties": {
                    "agent_id": {"type": "string", "description": "Agent ID to update"},
                    "name": {"type": "string", "description": "New display name"},
                    "description": {"type": "string", "description": "New description"},
                    "system_prompt": {"type": "string", "description": "New system prompt"},
                    "model": {"type": "string", "description": "New model"},
                    "temperature": {"type": "number", "description": "New temperature"},
                    "status": {
                        "type": "string",
                        "enum": ["active", "inactive"],
                        "description": "Agent status",
                    },
                },
                "required": ["agent_id"],
            }),
        ),
        ToolDefinition::new(
            "ai_team_delete_agent",
            "Delete a custom AI Team agent. Built-in agents cannot be deleted.",
            json!({
                "type": "object",
                "properties": {
                    "agent_id": {"type": "string", "description": "Agent ID to delete"},
                },
                "required": ["agent_id"],
            }),
        ),
        ToolDefinition::new(
            "ai_team_chat",
            "Send a message to an AI Team agent and wait for the response. This creates a new thread and polls until the agent responds.",
            json!({
                "type": "object",
                "properties": {
                    "agent_id": {
                        "type": "string",
                        "description": "Agent ID to chat with (e.g., 'sre', 'security-engineer', or custom agent UUID)",
                    },
                    "message": {
                        "type": "string",
                        "description": "Message to send to the agent",
                    },
                    "timeout": {
                        "type": "integer",
                        "description": "Max seconds to wait for response (default: 120)",
                        "default": 120,
                    },
                },
                "required": ["agent_id", "message"],
            }),
        ),
        ToolDefinition::new(
            "ai_team_create_thread",
            "Create a new thread (send a message) in a channel without waiting for response. Returns thread ID for later polling.",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": {
                        "type": "string",
                        "description": "Channel ID (e.g., 'dm-sre', 'dm-security-engineer', 'dm-{agent_uuid}')",
                    },
                    "message": {"type": "string", "description": "Message to send"},
                },
                "required": ["channel_id", "message"],
            }),
        ),
        ToolDefinition::new(
            "ai_team_get_thread",
            "Get a thread with its messages, state, score, and metadata.",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": {"type": "string", "description": "Channel ID"},
                    "thread_id": {"type": "string", "description": "Thread ID"},
                },
                "required": ["channel_id", "thread_id"],
            }),
        ),
        ToolDefinition::new(
            "ai_team_get_thread_messages",
            "Get all messages from a specific thread.",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": {"type": "string", "description": "Channel ID"},
                    "thread_id": {"type": "string", "description": "Thread ID"},
                },
                "required": ["channel_id", "thread_id"],
            }),
        ),
        ToolDefinition::new(
            "ai_team_list_threads",
            "List recent threads in a channel.",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": {"type": "string", "description": "Channel ID"},
                    "limit": {
                        "type": "integer",
                        "description": "Max threads to return (default: 20)",
                        "default": 20,
                    },
                },
                "required": ["channel_id"],
            }),
        ),
        ToolDefinition::new(
            "ai_team_list_channels",
            "List all AI Team channels including regular channels (alerts, code-issues, security-issues) and DM channels for each agent.",
            no_args(),
        ),
        ToolDefinition::new(
            "ai_team_get_channel",
            "Get detailed information about a specific channel.",
            json!({
                "type": "object",
                "properties": {
                    "channel_id": {"type": "string", "description": "Channel ID"},
                },
                "required": ["channel_id"],
            }),
        ),
        ToolDefinition::new(
            "ai_team_get_activity",
            "Get recent AI Team activity feed showing threads, messages, and agent interactions.",
            json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Max items (default: 20)",
                        "default": 20,
                    },
                    "lookback": {
                        "type": "string",
                        "description": "Lookback period (default: 7d)",
                        "default": "7d",
                    },
                    "channel_id": {
                        "type": "string",
                        "description": "Filter by channel ID (optional)",
                    },
                },
                "required": [],
            }),
        ),
        ToolDefinition::new(
            "ai_team_get_badge_count",
            "Get aggregate badge count for unread AI Team notifications.",
            json!({
                "type": "object",
                "properties": {
                    "lookback": {
                        "type": "string",
                        "description": "Lookback period (default: 7d)",
                        "default": "7d",
                    },
                },
                "required": [],
            }),
        ),
        ToolDefinition::new(
            "ai_team_list_models",
            "List available AI models that can be used for agents.",
            no_args(),
        ),
        ToolDefinition::new(
            "ai_team_list_connectors",
            "List available AI connectors (MCP tools, documentation sources) that agents can use.",
            no_args(),
        ),
        ToolDefinition::new(
            "ai_team_get_agent_tools",
            "Get the MCP tools assigned to a specific agent. Returns the tool configurations including tool name, connector, and status.",
            json!({
                "type": "object",
                "properties": {
                    "agent_id": {"type": "string", "description": "Agent ID to get tools for"},
                },
                "required": ["agent_id"],
            }),
        ),
        ToolDefinition::new(
            "ai_team_clone_agent",
            "Clone an existing agent with a new name. Copies all configuration (prompt, model, connectors, temperature, etc.) from the source agent. Any field can be overridden.",
            json!({
                "type": "object",
                "properties": {
                    "agent_id": {
                        "type": "string",
                        "description": "Source agent ID to clone from",
                    },
                    "new_name": {
                        "type": "string",
                        "description": "Name for the cloned agent",
                    },
                    "description": {"type": "string", "description": "Override description (optional)"},
                    "system_prompt": {"type": "string", "description": "Override system prompt (optional)"},
                    "model": {"type": "string", "description": "Override model (optional)"},
                    "temperature": {"type": "number", "description": "Override temperature (optional)"},
                },
                "required": ["agent_id", "new_name"],
            }),
        ),
        ToolDefinition::new(
            "ai_team_search_threads",
            "Search threads across all channels. Filter by time window and thread state (investigating, resolved, done).",
            json!({
                "type": "object",
                "properties": {
                    "lookback": {
                        "type": "string",
                        "description": "Time window (e.g. '1h', '24h', '7d'). Default: '7d'",
                        "default": "7d",
                    },
                    "state": {
                        "type": "string",
                        "enum": ["investigating", "resolved", "done"],
                        "description": "Filter by thread state (optional)",
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Max results (default: 50)",
                        "default": 50,
                    },
                },
                "required": [],
            }),
        ),
    ]
}

/// Looks up a tool definition by name.
pub fn find_tool(name: &str) -> Option<ToolDefinition> {
    tools().into_iter().find(|t| t.name == name)
}

/// Serializes the full manifest in the `{"tools": [...]}` registration shape.
pub fn manifest() -> Value {
    json!({"tools": tools()})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tool_is_prefixed_and_schematized() {
        let tools = tools();
        assert_eq!(tools.len(), 19);
        for tool in &tools {
            assert!(tool.name.starts_with("ai_team_"), "{}", tool.name);
            assert!(!tool.description.is_empty());
            assert_eq!(tool.input_schema["type"], "object");
            assert!(tool.input_schema["required"].is_array());
        }
    }

    #[test]
    fn lookup_by_name() {
        let tool = find_tool("ai_team_chat").unwrap();
        let required = tool.input_schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
        assert!(find_tool("ai_team_nope").is_none());
    }

    #[test]
    fn serializes_with_camel_case_schema_key() {
        let value = serde_json::to_value(find_tool("ai_team_list_models").unwrap()).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert!(value.get("input_schema").is_none());
    }
}
