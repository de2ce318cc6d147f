use std::fmt;

use serde::{Deserialize, Serialize};

/// Author of a message within a thread.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The human caller who opened the thread.
    User,

    /// The responding agent.
    Agent,

    /// Any role token this client does not recognize.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Agent => write!(f, "agent"),
            MessageRole::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_round_trip() {
        let role: MessageRole = serde_json::from_str(r#""agent""#).unwrap();
        assert_eq!(role, MessageRole::Agent);
        assert_eq!(serde_json::to_string(&role).unwrap(), r#""agent""#);
    }

    #[test]
    fn unrecognized_roles_fall_back() {
        let role: MessageRole = serde_json::from_str(r#""system""#).unwrap();
        assert_eq!(role, MessageRole::Unknown);
    }
}
