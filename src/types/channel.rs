use serde::{Deserialize, Serialize};

/// A named mailbox-like resource that threads belong to.
///
/// Channels include shared channels (alerts, security-issues) and one DM
/// channel per agent (`dm-<agent_id>`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Opaque channel identifier.
    pub id: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Channel type (`dm`, `channel`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    /// Channel description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Channel {
    /// Returns the display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_id() {
        let channel: Channel = serde_json::from_str(r#"{"id": "dm-sre"}"#).unwrap();
        assert_eq!(channel.display_name(), "dm-sre");
    }
}
