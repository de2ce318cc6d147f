use serde::{Deserialize, Serialize};

use crate::types::Message;

/// A page of messages inlined into a thread representation.
///
/// Thread fetches can inline a message page under `messages.data`; an empty
/// page means the caller must fall back to the dedicated messages listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessagePage {
    /// The messages in this page, in thread order.
    #[serde(default)]
    pub data: Vec<Message>,
}

impl MessagePage {
    /// Returns true if this page holds no messages.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_from_empty_object() {
        let page: MessagePage = serde_json::from_str("{}").unwrap();
        assert!(page.is_empty());
    }
}
