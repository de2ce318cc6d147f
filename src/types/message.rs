use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{MessagePart, MessageRole};

/// A single message within a conversation thread.
///
/// Messages belong to exactly one thread and carry an ordered sequence of
/// [`MessagePart`]s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier, when the service provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Author of the message.
    pub role: MessageRole,

    /// Creation timestamp, RFC 3339.
    #[serde(
        default,
        with = "crate::utils::time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,

    /// Ordered content parts.
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

impl Message {
    /// Creates an agent-authored message with a single text part.
    pub fn agent_text(text: impl Into<String>) -> Self {
        Self {
            id: None,
            role: MessageRole::Agent,
            created_at: None,
            parts: vec![MessagePart::text(text)],
        }
    }

    /// Creates a user-authored message with a single text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            id: None,
            role: MessageRole::User,
            created_at: None,
            parts: vec![MessagePart::text(text)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_wire_shape() {
        let json = json!({
            "id": "msg-1",
            "role": "agent",
            "createdAt": "2026-02-01T08:00:00Z",
            "parts": [
                {"type": "tool_use", "toolName": "log_search"},
                {"type": "text", "text": "found it"}
            ]
        });
        let msg: Message = serde_json::from_value(json).unwrap();
        assert_eq!(msg.role, MessageRole::Agent);
        assert!(msg.created_at.is_some());
        assert_eq!(msg.parts.len(), 2);
        assert_eq!(msg.parts[1].as_text(), Some("found it"));
    }

    #[test]
    fn tolerates_missing_parts_and_timestamp() {
        let json = json!({"role": "user"});
        let msg: Message = serde_json::from_value(json).unwrap();
        assert_eq!(msg.role, MessageRole::User);
        assert!(msg.parts.is_empty());
        assert!(msg.created_at.is_none());
    }
}
