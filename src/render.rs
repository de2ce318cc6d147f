//! Output rendering for the CLI binaries.
//!
//! Every function builds a `String`; the binaries decide where it goes.
//! Formatting follows a plain, grep-friendly layout: a `====` header rule,
//! one entity per stanza, tool-use parts shown as `[tool: name]` markers.

use time::OffsetDateTime;
use time::macros::format_description;

use crate::prompts::PromptTemplate;
use crate::types::{
    ActivityItem, Agent, AgentTool, Channel, Integration, Message, MessagePart, ModelEntry, Thread,
};

/// ANSI escape code for dim text.
pub const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for cyan text (agent replies in the REPL).
pub const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code to reset all styling.
pub const ANSI_RESET: &str = "\x1b[0m";

const RULE: &str = "================================================================================";

/// `====` header rule with a title line.
pub fn heading(title: &str) -> String {
    format!("{RULE}\n{title}\n{RULE}\n")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

fn short_timestamp(ts: Option<OffsetDateTime>) -> String {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    ts.and_then(|t| t.format(&format).ok()).unwrap_or_default()
}

/// Renders the agent listing.
pub fn agents_list(agents: &[Agent]) -> String {
    let mut out = heading(&format!("AI Agents ({} total)", agents.len()));
    for agent in agents {
        let status_icon = if agent.status == "active" { "O" } else { "x" };
        out.push_str(&format!(
            "  [{status_icon}] {:<30} {:<20} type={}\n",
            agent.name, agent.model, agent.r#type
        ));
        out.push_str(&format!("      ID: {}\n", agent.id));
        if !agent.description.is_empty() {
            out.push_str(&format!("      {}\n", truncate(&agent.description, 70)));
        }
        out.push('\n');
    }
    out
}

/// Renders the channel listing.
pub fn channels_list(channels: &[Channel]) -> String {
    let mut out = heading(&format!("Channels ({} total)", channels.len()));
    for channel in channels {
        let channel_type = channel.r#type.as_deref().unwrap_or("unknown");
        out.push_str(&format!(
            "  [{channel_type:<8}] {:<35} ID: {}\n",
            channel.display_name(),
            channel.id
        ));
        if let Some(description) = &channel.description {
            out.push_str(&format!("             {}\n", truncate(description, 60)));
        }
    }
    out
}

/// Renders the thread listing for one channel.
pub fn threads_list(channel_id: &str, threads: &[Thread]) -> String {
    let mut out = heading(&format!(
        "Threads in {channel_id} ({} shown)",
        threads.len()
    ));
    for thread in threads {
        let title = truncate(thread.title.as_deref().unwrap_or("untitled"), 60);
        let score = thread
            .score
            .map(|s| s.to_string())
            .unwrap_or_default();
        out.push_str(&format!("  [{:<12}] {title}\n", thread.state.as_str()));
        out.push_str(&format!(
            "    ID: {}  msgs: {}  score: {score}  created: {}\n\n",
            thread.id,
            thread.message_count,
            short_timestamp(thread.created_at)
        ));
    }
    out
}

/// Renders a thread transcript: header plus one stanza per message.
pub fn transcript(thread: &Thread, messages: &[Message]) -> String {
    let mut out = format!(
        "{RULE}\nThread: {}\nState: {}  Score: {}\n{RULE}\n\n",
        thread.title.as_deref().unwrap_or("untitled"),
        thread.state,
        thread
            .score
            .map(|s| s.to_string())
            .unwrap_or_default()
    );
    for message in messages {
        out.push_str(&format!(
            "--- {} [{}] ---\n",
            message.role.to_string().to_uppercase(),
            short_timestamp(message.created_at)
        ));
        for part in &message.parts {
            match part {
                MessagePart::Text { text } => {
                    out.push_str(text);
                    out.push('\n');
                }
                MessagePart::ToolUse { tool_name } => {
                    out.push_str(&format!("  [tool: {tool_name}]\n"));
                }
                MessagePart::ToolResult { result } => {
                    out.push_str(&format!(
                        "  [tool result: {}]\n",
                        truncate(&result.to_string(), 200)
                    ));
                }
                MessagePart::Unknown => {}
            }
        }
        out.push('\n');
    }
    out
}

/// Renders the activity feed (also used for thread search results).
pub fn activity_list(title: &str, items: &[ActivityItem]) -> String {
    let mut out = heading(title);
    for item in items {
        out.push_str(&format!(
            "  [{:<12}] {}\n",
            item.state.as_str(),
            truncate(item.display_title(), 60)
        ));
        let updated: String = item
            .last_activity()
            .unwrap_or("")
            .chars()
            .take(19)
            .collect();
        out.push_str(&format!(
            "    channel: {}  updated: {updated}\n\n",
            item.channel_id.as_deref().unwrap_or("unknown")
        ));
    }
    out
}

/// Renders the integration listing.
pub fn integrations_list(integrations: &[Integration]) -> String {
    let mut out = heading(&format!("Integrations ({} total)", integrations.len()));
    for integration in integrations {
        let display = integration.display_name.as_deref().unwrap_or("");
        let label = if !display.is_empty() && display != integration.name {
            format!("{display} ({})", integration.name)
        } else {
            integration.name.clone()
        };
        out.push_str(&format!(
            "  [{:<15}] {label:<40} status: {}\n",
            integration.r#type,
            integration
                .event_connector_connection_status
                .as_deref()
                .unwrap_or("unknown")
        ));
        if let Some(creator) = &integration.creator {
            out.push_str(&format!("{:>20} created by: {creator}\n", ""));
        }
    }
    out
}

/// Renders an agent's MCP tools grouped by connector.
pub fn agent_tools(agent_id: &str, tools: &[AgentTool]) -> String {
    let mut out = heading(&format!(
        "MCP Tools for agent {agent_id} ({} tools)",
        tools.len()
    ));
    let mut connectors: Vec<&str> = tools.iter().map(|t| t.connector.as_str()).collect();
    connectors.sort_unstable();
    connectors.dedup();
    for connector in connectors {
        let connector_tools: Vec<&AgentTool> =
            tools.iter().filter(|t| t.connector == connector).collect();
        out.push_str(&format!(
            "\n  [{connector}] ({} tools)\n",
            connector_tools.len()
        ));
        for tool in connector_tools {
            out.push_str(&format!("    [{:<8}] {}\n", tool.status, tool.tool_name));
        }
    }
    out
}

/// Renders the model listing.
pub fn models_list(models: &[ModelEntry]) -> String {
    let mut out = heading(&format!("Available AI Models ({} total)", models.len()));
    for model in models {
        out.push_str(&format!("  - {}\n", model.display_name()));
    }
    out
}

/// Renders the built-in prompt template listing.
pub fn prompt_templates(templates: &[PromptTemplate]) -> String {
    let mut out = heading("Available Agent Templates");
    for template in templates {
        out.push_str(&format!("\n  {}\n", template.key));
        out.push_str(&format!("    Name:  {}\n", template.name));
        out.push_str(&format!("    Role:  {}\n", template.role));
        out.push_str(&format!("    Model: {}\n", template.model));
        out.push_str(&format!("    Desc:  {}\n", truncate(template.description, 60)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MessageRole, ThreadState};
    use serde_json::json;

    fn sample_thread() -> Thread {
        Thread {
            id: "thr-1".to_string(),
            title: Some("why is checkout slow".to_string()),
            state: ThreadState::Done,
            message_count: 2,
            score: Some(0.8),
            created_at: None,
            messages: None,
        }
    }

    #[test]
    fn transcript_marks_tool_parts() {
        let messages = vec![
            Message::user_text("why is checkout slow"),
            Message {
                id: None,
                role: MessageRole::Agent,
                created_at: None,
                parts: vec![
                    MessagePart::ToolUse {
                        tool_name: "log_search".to_string(),
                    },
                    MessagePart::ToolResult {
                        result: json!({"hits": 3}),
                    },
                    MessagePart::text("found a slow query"),
                ],
            },
        ];
        let out = transcript(&sample_thread(), &messages);
        assert!(out.contains("--- USER ["));
        assert!(out.contains("--- AGENT ["));
        assert!(out.contains("[tool: log_search]"));
        assert!(out.contains("[tool result: "));
        assert!(out.contains("found a slow query"));
    }

    #[test]
    fn threads_list_shows_state_and_counts() {
        let out = threads_list("dm-sre", &[sample_thread()]);
        assert!(out.contains("Threads in dm-sre (1 shown)"));
        assert!(out.contains("[done        ]"));
        assert!(out.contains("msgs: 2"));
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("0123456789abc", 10), "0123456789...");
    }

    #[test]
    fn truncate_is_char_boundary_safe() {
        let title = "latenz-spike im warenkorb-dienst über 500ms, bitte prüfen";
        let out = truncate(title, 40);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 43);
    }
}
