use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Parameters for creating a thread.
///
/// The `title` field IS the opening message. The `client_temp_id` is a
/// client-generated idempotency token: retrying creation with the same token
/// must not produce a second thread server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadCreateParams {
    /// Client-generated idempotency token.
    pub client_temp_id: String,

    /// Opening message of the thread.
    pub title: String,
}

impl ThreadCreateParams {
    /// Creates thread-creation parameters with a fresh idempotency token.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            client_temp_id: fresh_client_temp_id(),
            title: message.into(),
        }
    }

    /// Overrides the idempotency token (for deliberate retries of the same
    /// creation request).
    pub fn with_client_temp_id(mut self, client_temp_id: impl Into<String>) -> Self {
        self.client_temp_id = client_temp_id.into();
        self
    }
}

/// Generates a fresh idempotency token of the form `thread:<opaque>`.
pub fn fresh_client_temp_id() -> String {
    let raw = rand::random::<[u8; 16]>();
    format!("thread:{}", URL_SAFE_NO_PAD.encode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_wire_shape() {
        let params = ThreadCreateParams::new("ping").with_client_temp_id("thread:abc");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"clientTempId": "thread:abc", "title": "ping"})
        );
    }

    #[test]
    fn tokens_are_prefixed_and_unique() {
        let a = fresh_client_temp_id();
        let b = fresh_client_temp_id();
        assert!(a.starts_with("thread:"));
        assert!(b.starts_with("thread:"));
        assert_ne!(a, b);
    }
}
