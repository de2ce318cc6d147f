use serde::{Deserialize, Serialize};

/// One typed fragment of a message's content.
///
/// Parts come off the wire as loose tagged dictionaries; here they are a
/// variant type so consumers match instead of probing fields. Only
/// [`MessagePart::Text`] parts of agent-authored messages carry
/// the reply the round-trip engine extracts; tool invocations and results
/// are observable only through the raw message list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum MessagePart {
    /// A plain text fragment.
    #[serde(rename = "text")]
    Text {
        /// The text payload.
        #[serde(default)]
        text: String,
    },

    /// A tool invocation by the agent.
    #[serde(rename = "tool_use")]
    ToolUse {
        /// Name of the invoked tool.
        #[serde(default, rename = "toolName")]
        tool_name: String,
    },

    /// The result of a tool invocation.
    #[serde(rename = "tool_result")]
    ToolResult {
        /// Opaque result value.
        #[serde(default)]
        result: serde_json::Value,
    },

    /// A part type this client does not model; deserializing one must not
    /// fail the whole message.
    #[serde(other)]
    Unknown,
}

impl MessagePart {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        MessagePart::Text { text: text.into() }
    }

    /// Returns true if this part is a text part.
    pub fn is_text(&self) -> bool {
        matches!(self, MessagePart::Text { .. })
    }

    /// Returns the text payload if this is a text part, or None otherwise.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessagePart::Text { text } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_part_round_trip() {
        let part = MessagePart::text("pong");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json, json!({"type": "text", "text": "pong"}));
        let back: MessagePart = serde_json::from_value(json).unwrap();
        assert_eq!(back, part);
    }

    #[test]
    fn tool_use_part_deserializes() {
        let json = json!({"type": "tool_use", "toolName": "log_search"});
        let part: MessagePart = serde_json::from_value(json).unwrap();
        assert_eq!(
            part,
            MessagePart::ToolUse {
                tool_name: "log_search".to_string()
            }
        );
        assert!(!part.is_text());
        assert!(part.as_text().is_none());
    }

    #[test]
    fn tool_result_keeps_opaque_value() {
        let json = json!({"type": "tool_result", "result": {"rows": 3}});
        let part: MessagePart = serde_json::from_value(json).unwrap();
        match part {
            MessagePart::ToolResult { result } => {
                assert_eq!(result["rows"], 3);
            }
            _ => panic!("expected tool_result"),
        }
    }

    #[test]
    fn unknown_part_type_does_not_fail() {
        let json = json!({"type": "reasoning", "text": "thinking..."});
        let part: MessagePart = serde_json::from_value(json).unwrap();
        assert_eq!(part, MessagePart::Unknown);
    }

    #[test]
    fn tool_use_tolerates_missing_name() {
        let json = json!({"type": "tool_use"});
        let part: MessagePart = serde_json::from_value(json).unwrap();
        assert_eq!(
            part,
            MessagePart::ToolUse {
                tool_name: String::new()
            }
        );
    }
}
