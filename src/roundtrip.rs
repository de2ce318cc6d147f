//! Send-and-await round trips.
//!
//! The AI Team service has no streaming or push surface for replies. A chat
//! exchange is therefore a round trip: create a thread with the outbound
//! message as its title, then poll the thread until an agent marks it
//! terminal or enough messages accumulate. Running out the polling budget is
//! not a failure; the caller gets whatever the thread held at the deadline,
//! with the result state set to [`ThreadState::Timeout`].

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::client::AiTeam;
use crate::error::{Error, Result};
use crate::observability::{
    ROUNDTRIP_DURATION, ROUNDTRIP_POLLS, ROUNDTRIP_STARTED, ROUNDTRIP_TIMEOUTS,
};
use crate::types::{Message, MessagePart, MessageRole, Thread, ThreadCreateParams, ThreadState};

/// Default overall deadline for a round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default interval between thread polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Message limit passed on every poll so replies arrive inline.
pub const POLL_MESSAGE_LIMIT: u32 = 10_000;

/// The thread operations the round-trip engine needs.
///
/// [`crate::AiTeam`] implements this against the live service; tests
/// implement it with scripted snapshots.
#[async_trait]
pub trait ThreadTransport {
    /// Create a thread in a channel.
    async fn create_thread(&self, channel_id: &str, params: ThreadCreateParams) -> Result<Thread>;

    /// Fetch a thread with up to `message_limit` messages inlined.
    async fn get_thread(
        &self,
        channel_id: &str,
        thread_id: &str,
        message_limit: u32,
    ) -> Result<Thread>;

    /// Fetch a thread's messages via the dedicated listing endpoint.
    async fn get_thread_messages(&self, channel_id: &str, thread_id: &str) -> Result<Vec<Message>>;
}

#[async_trait]
impl ThreadTransport for AiTeam {
    async fn create_thread(&self, channel_id: &str, params: ThreadCreateParams) -> Result<Thread> {
        AiTeam::create_thread(self, channel_id, params).await
    }

    async fn get_thread(
        &self,
        channel_id: &str,
        thread_id: &str,
        message_limit: u32,
    ) -> Result<Thread> {
        AiTeam::get_thread(self, channel_id, thread_id, message_limit).await
    }

    async fn get_thread_messages(&self, channel_id: &str, thread_id: &str) -> Result<Vec<Message>> {
        AiTeam::get_thread_messages(self, channel_id, thread_id).await
    }
}

/// Tuning knobs for [`send_and_await`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTripConfig {
    /// Overall deadline for the round trip.
    pub timeout: Duration,

    /// Interval between polls.
    pub poll_interval: Duration,
}

impl Default for RoundTripConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl RoundTripConfig {
    /// Sets the overall deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Rejects configurations that would spin or never poll.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(Error::validation(
                "poll interval must be greater than zero",
                Some("poll_interval".to_string()),
            ));
        }
        Ok(())
    }
}

/// Outcome of a round trip.
///
/// `state` is the engine's verdict: the thread's state when it went
/// terminal, or [`ThreadState::Timeout`] when the deadline expired first.
/// The thread snapshot inside keeps whatever raw state the service last
/// reported.
#[derive(Debug, Clone)]
pub struct RoundTripResult {
    /// The last-observed thread snapshot.
    pub thread: Thread,

    /// All messages observed on the thread, in service order.
    pub messages: Vec<Message>,

    /// Terminal state, or [`ThreadState::Timeout`] if the deadline expired.
    pub state: ThreadState,
}

impl RoundTripResult {
    /// Extracts the first agent reply as text.
    ///
    /// Text parts within the message are joined with newlines. When no agent
    /// message with text exists yet, a sentinel naming the state is returned
    /// so callers always have something to show.
    pub fn first_text_reply(&self) -> String {
        for message in &self.messages {
            if message.role != MessageRole::Agent {
                continue;
            }
            let texts: Vec<&str> = message
                .parts
                .iter()
                .filter_map(MessagePart::as_text)
                .collect();
            if !texts.is_empty() {
                return texts.join("\n");
            }
        }
        format!("[no response yet - state: {}]", self.state)
    }

    /// Returns true if the deadline expired before the thread went terminal.
    pub fn timed_out(&self) -> bool {
        self.state == ThreadState::Timeout
    }
}

/// Returns the conventional DM channel id for an agent.
pub fn dm_channel(agent_id: &str) -> String {
    format!("dm-{agent_id}")
}

/// Sends a message into a channel and waits for the thread to settle.
///
/// Creates a thread titled with the message, then polls every
/// `config.poll_interval` until the thread reaches a terminal state or holds
/// at least two messages (the outbound message plus a reply), bounded by
/// `config.timeout`. On deadline expiry the thread is fetched one final time
/// and the partial result is returned as data, never as an error.
pub async fn send_and_await<T: ThreadTransport + Sync>(
    transport: &T,
    channel_id: &str,
    message: &str,
    config: RoundTripConfig,
) -> Result<RoundTripResult> {
    if message.trim().is_empty() {
        return Err(Error::validation(
            "message must not be empty",
            Some("message".to_string()),
        ));
    }
    config.validate()?;

    ROUNDTRIP_STARTED.click();
    let start = Instant::now();

    let params = ThreadCreateParams::new(message);
    let thread = transport.create_thread(channel_id, params).await?;
    let thread_id = thread.id.clone();
    let mut latest = thread;

    let mut settled = false;
    while start.elapsed() < config.timeout {
        tokio::time::sleep(config.poll_interval).await;
        ROUNDTRIP_POLLS.click();
        latest = transport
            .get_thread(channel_id, &thread_id, POLL_MESSAGE_LIMIT)
            .await?;
        if latest.state.is_terminal() || latest.message_count >= 2 {
            settled = true;
            break;
        }
    }

    if !settled {
        ROUNDTRIP_TIMEOUTS.click();
        // One last look so the caller sees the freshest partial state.
        latest = transport
            .get_thread(channel_id, &thread_id, POLL_MESSAGE_LIMIT)
            .await?;
    }

    let messages = collect_messages(transport, channel_id, &thread_id, &latest).await?;
    ROUNDTRIP_DURATION.add(start.elapsed().as_secs_f64());

    let state = if settled {
        latest.state.clone()
    } else {
        ThreadState::Timeout
    };
    Ok(RoundTripResult {
        thread: latest,
        messages,
        state,
    })
}

/// Uses messages inlined in the thread snapshot when present, otherwise
/// falls back to the dedicated listing endpoint.
async fn collect_messages<T: ThreadTransport + Sync>(
    transport: &T,
    channel_id: &str,
    thread_id: &str,
    thread: &Thread,
) -> Result<Vec<Message>> {
    let inline = thread.inline_messages();
    if !inline.is_empty() {
        return Ok(inline.to_vec());
    }
    transport.get_thread_messages(channel_id, thread_id).await
}

impl AiTeam {
    /// Sends a message to an agent's DM channel and waits for the reply.
    pub async fn send_message_and_wait(
        &self,
        channel_id: &str,
        message: &str,
        config: RoundTripConfig,
    ) -> Result<RoundTripResult> {
        send_and_await(self, channel_id, message, config).await
    }

    /// Sends a message to an agent and returns its first text reply.
    ///
    /// The conversation happens in the agent's DM channel (`dm-{agent_id}`).
    pub async fn chat(
        &self,
        agent_id: &str,
        message: &str,
        config: RoundTripConfig,
    ) -> Result<String> {
        let result = self
            .send_message_and_wait(&dm_channel(agent_id), message, config)
            .await?;
        Ok(result.first_text_reply())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent_message(text: &str) -> Message {
        Message::agent_text(text)
    }

    fn result_with(messages: Vec<Message>, state: ThreadState) -> RoundTripResult {
        RoundTripResult {
            thread: Thread {
                id: "t-1".to_string(),
                title: None,
                state: state.clone(),
                message_count: messages.len() as u64,
                score: None,
                created_at: None,
                messages: None,
            },
            messages,
            state,
        }
    }

    #[test]
    fn first_text_reply_joins_text_parts() {
        let mut msg = agent_message("part one");
        msg.parts.push(MessagePart::ToolUse {
            tool_name: "search".to_string(),
        });
        msg.parts.push(MessagePart::text("part two"));
        let result = result_with(
            vec![Message::user_text("question"), msg],
            ThreadState::Resolved,
        );
        assert_eq!(result.first_text_reply(), "part one\npart two");
    }

    #[test]
    fn first_text_reply_skips_user_and_toolonly_messages() {
        let tool_only = Message {
            id: None,
            role: MessageRole::Agent,
            created_at: None,
            parts: vec![MessagePart::ToolUse {
                tool_name: "lookup".to_string(),
            }],
        };
        let result = result_with(
            vec![
                Message::user_text("hi"),
                tool_only,
                agent_message("actual answer"),
            ],
            ThreadState::Done,
        );
        assert_eq!(result.first_text_reply(), "actual answer");
    }

    #[test]
    fn first_text_reply_sentinel_names_state() {
        let result = result_with(vec![Message::user_text("hi")], ThreadState::Timeout);
        assert_eq!(result.first_text_reply(), "[no response yet - state: timeout]");
        assert!(result.timed_out());
    }

    #[test]
    fn dm_channel_convention() {
        assert_eq!(dm_channel("agent-42"), "dm-agent-42");
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let config = RoundTripConfig::default().with_poll_interval(Duration::ZERO);
        assert!(config.validate().unwrap_err().is_validation());
    }
}
