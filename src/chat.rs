//! Slash commands and configuration for the interactive chat binary.
//!
//! Each REPL line is either a slash command handled locally or a message
//! that runs a full round trip against the agent's DM channel.

use arrrg_derive::CommandLine;

/// Command-line arguments for the aiteam-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Organization ID.
    #[arrrg(optional, "Organization ID (default: ED_ORG_ID)", "ORG")]
    pub org_id: Option<String>,

    /// Bearer token for the chat/agent surfaces.
    #[arrrg(optional, "Bearer token (default: ED_JWT)", "JWT")]
    pub jwt: Option<String>,

    /// Env file to load credentials from.
    #[arrrg(optional, "Path to a KEY=VALUE env file", "PATH")]
    pub env_file: Option<String>,

    /// Agent to chat with.
    #[arrrg(optional, "Agent ID to chat with (default: sre)", "AGENT")]
    pub agent: Option<String>,

    /// Per-message response timeout in seconds.
    #[arrrg(optional, "Response timeout in seconds (default: 120)", "SECONDS")]
    pub timeout: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the service.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Switch to a different agent's DM channel.
    Agent(String),

    /// Set the per-message response timeout in seconds.
    Timeout(u64),

    /// Toggle raw thread output (full JSON instead of first text reply).
    Raw(bool),

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be sent as a regular message.
///
/// # Examples
///
/// ```
/// # use aiteam::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/agent security-engineer").is_some());
/// assert!(parse_command("why is checkout slow?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        "agent" => match argument {
            Some(agent) => ChatCommand::Agent(agent.to_string()),
            None => ChatCommand::Invalid("/agent requires an agent id".to_string()),
        },
        "timeout" => match argument {
            Some(arg) => match arg.parse::<u64>() {
                Ok(value) if value > 0 => ChatCommand::Timeout(value),
                _ => ChatCommand::Invalid(
                    "/timeout expects a positive number of seconds".to_string(),
                ),
            },
            None => ChatCommand::Invalid("/timeout requires a value".to_string()),
        },
        "raw" => match argument.and_then(parse_on_off) {
            Some(value) => ChatCommand::Raw(value),
            None => ChatCommand::Invalid("/raw expects 'on' or 'off'".to_string()),
        },
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_on_off(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /agent <id>            Switch to another agent's DM channel
  /timeout <seconds>     Set the per-message response timeout
  /raw on|off            Show full thread JSON instead of the text reply
  /help                  Show this help message
  /quit                  Exit the chat"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_agent() {
        assert_eq!(
            parse_command("/agent security-engineer"),
            Some(ChatCommand::Agent("security-engineer".to_string()))
        );
        assert_eq!(
            parse_command("/agent"),
            Some(ChatCommand::Invalid("/agent requires an agent id".to_string()))
        );
    }

    #[test]
    fn parse_timeout() {
        assert_eq!(parse_command("/timeout 300"), Some(ChatCommand::Timeout(300)));
        assert!(matches!(
            parse_command("/timeout 0"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("positive")
        ));
        assert!(matches!(
            parse_command("/timeout soon"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_raw_toggle() {
        assert_eq!(parse_command("/raw on"), Some(ChatCommand::Raw(true)));
        assert_eq!(parse_command("/raw off"), Some(ChatCommand::Raw(false)));
        assert!(matches!(
            parse_command("/raw maybe"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("expects")
        ));
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("why is checkout slow?"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(help.contains("/quit"));
        assert!(help.contains("/agent"));
        assert!(help.contains("/timeout"));
    }
}
