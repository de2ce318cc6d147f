use serde::{Deserialize, Serialize};

use crate::types::ThreadState;

/// One entry in the activity feed.
///
/// Activity items are thread-centric; field names vary slightly between feed
/// endpoints, so titles and timestamps each have a fallback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    /// Thread title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Alternate title field used by some feed shapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_title: Option<String>,

    /// Channel the thread belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,

    /// Thread state at last activity.
    #[serde(default)]
    pub state: ThreadState,

    /// Last activity timestamp, RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<String>,

    /// Alternate timestamp field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ActivityItem {
    /// Returns the best available title.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.thread_title.as_deref())
            .unwrap_or("untitled")
    }

    /// Returns the best available last-activity timestamp.
    pub fn last_activity(&self) -> Option<&str> {
        self.last_activity_at
            .as_deref()
            .or(self.updated_at.as_deref())
    }
}

/// Aggregate unread badge count.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BadgeCount {
    /// Number of threads with unread activity.
    #[serde(default)]
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn title_and_timestamp_fallbacks() {
        let item: ActivityItem = serde_json::from_value(json!({
            "threadTitle": "disk full on prod-3",
            "channelId": "alerts",
            "state": "investigating",
            "updatedAt": "2026-02-01T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(item.display_title(), "disk full on prod-3");
        assert_eq!(item.last_activity(), Some("2026-02-01T08:00:00Z"));
        assert_eq!(item.state, ThreadState::Investigating);
    }

    #[test]
    fn empty_item_has_placeholder_title() {
        let item: ActivityItem = serde_json::from_value(json!({})).unwrap();
        assert_eq!(item.display_title(), "untitled");
        assert!(item.last_activity().is_none());
    }
}
