use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle state of a conversation thread.
///
/// The service reports state as an open-ended string token. The known
/// completion tokens are `resolved` and `done`; anything unrecognized means
/// the thread is still in progress and is preserved verbatim in
/// [`ThreadState::Other`]. `timeout` is never produced by the service: the
/// round-trip engine stamps it on results whose wait expired.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThreadState {
    /// An agent is actively working the thread.
    Investigating,

    /// The thread was resolved.
    Resolved,

    /// The thread completed.
    Done,

    /// The round-trip wait expired before a terminal condition was observed.
    Timeout,

    /// An unrecognized state token, preserved verbatim.
    Other(String),
}

impl ThreadState {
    /// Returns the wire representation of this state.
    pub fn as_str(&self) -> &str {
        match self {
            ThreadState::Investigating => "investigating",
            ThreadState::Resolved => "resolved",
            ThreadState::Done => "done",
            ThreadState::Timeout => "timeout",
            ThreadState::Other(s) => s,
        }
    }

    /// Returns true if this state is a completion token.
    ///
    /// Only `resolved` and `done` are terminal. `timeout` is a client-side
    /// marker and `investigating` (or any unknown token) means the agent is
    /// still working.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ThreadState::Resolved | ThreadState::Done)
    }
}

impl Default for ThreadState {
    fn default() -> Self {
        ThreadState::Other("unknown".to_string())
    }
}

impl fmt::Display for ThreadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for ThreadState {
    fn from(s: &str) -> Self {
        match s {
            "investigating" => ThreadState::Investigating,
            "resolved" => ThreadState::Resolved,
            "done" => ThreadState::Done,
            "timeout" => ThreadState::Timeout,
            other => ThreadState::Other(other.to_string()),
        }
    }
}

impl From<String> for ThreadState {
    fn from(s: String) -> Self {
        ThreadState::from(s.as_str())
    }
}

impl FromStr for ThreadState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ThreadState::from(s))
    }
}

impl Serialize for ThreadState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ThreadState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ThreadState::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens() {
        assert_eq!(ThreadState::from("resolved"), ThreadState::Resolved);
        assert_eq!(ThreadState::from("done"), ThreadState::Done);
        assert_eq!(
            ThreadState::from("investigating"),
            ThreadState::Investigating
        );
        assert_eq!(ThreadState::from("timeout"), ThreadState::Timeout);
    }

    #[test]
    fn unknown_tokens_round_trip() {
        let state = ThreadState::from("triaging");
        assert_eq!(state, ThreadState::Other("triaging".to_string()));
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#""triaging""#);
        let back: ThreadState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn only_completion_tokens_are_terminal() {
        assert!(ThreadState::Resolved.is_terminal());
        assert!(ThreadState::Done.is_terminal());
        assert!(!ThreadState::Investigating.is_terminal());
        assert!(!ThreadState::Timeout.is_terminal());
        assert!(!ThreadState::Other("triaging".to_string()).is_terminal());
    }
}
