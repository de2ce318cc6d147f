use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{Message, MessagePage, ThreadState};

/// A conversation thread within a channel.
///
/// Threads are created by the caller; their state is mutated exclusively by
/// the remote service as agents process them. Within one polling session the
/// message count only increases, but it may start at any value (including
/// zero for a thread observed before its opening message lands).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    /// Opaque thread identifier.
    pub id: String,

    /// Thread title. For threads created by this client, the title is the
    /// opening message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Lifecycle state token.
    #[serde(default)]
    pub state: ThreadState,

    /// Number of messages in the thread.
    #[serde(default)]
    pub message_count: u64,

    /// Agent-assigned score, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Creation timestamp, RFC 3339.
    #[serde(
        default,
        with = "crate::utils::time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,

    /// Inline message page, when the fetch requested one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<MessagePage>,
}

impl Thread {
    /// Returns the inline messages, or an empty slice if none were inlined.
    pub fn inline_messages(&self) -> &[Message] {
        self.messages.as_ref().map(|p| p.data.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_with_inline_messages() {
        let json = json!({
            "id": "thr-1",
            "title": "ping",
            "state": "done",
            "messageCount": 2,
            "score": 0.9,
            "messages": {"data": [
                {"role": "user", "parts": [{"type": "text", "text": "ping"}]},
                {"role": "agent", "parts": [{"type": "text", "text": "pong"}]}
            ]}
        });
        let thread: Thread = serde_json::from_value(json).unwrap();
        assert_eq!(thread.state, ThreadState::Done);
        assert_eq!(thread.message_count, 2);
        assert_eq!(thread.inline_messages().len(), 2);
    }

    #[test]
    fn tolerates_minimal_creation_response() {
        let json = json!({"id": "thr-2", "state": "investigating"});
        let thread: Thread = serde_json::from_value(json).unwrap();
        assert_eq!(thread.message_count, 0);
        assert!(thread.inline_messages().is_empty());
        assert!(thread.title.is_none());
    }
}
