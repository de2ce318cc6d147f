//! Tests for the send-and-await round-trip engine against a scripted
//! transport with paused tokio time.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use aiteam::roundtrip::{RoundTripConfig, ThreadTransport, dm_channel, send_and_await};
use aiteam::types::{
    Message, MessagePage, MessagePart, MessageRole, Thread, ThreadCreateParams, ThreadState,
};
use aiteam::{Error, Result};

/// One observable state of the remote thread: what a poll at that point
/// returns.
#[derive(Clone)]
struct Snapshot {
    state: ThreadState,
    messages: Vec<Message>,
    inline: bool,
}

impl Snapshot {
    fn new(state: ThreadState, messages: Vec<Message>) -> Self {
        Self {
            state,
            messages,
            inline: true,
        }
    }

    fn without_inline(mut self) -> Self {
        self.inline = false;
        self
    }

    fn thread(&self) -> Thread {
        Thread {
            id: "thr-1".to_string(),
            title: None,
            state: self.state.clone(),
            message_count: self.messages.len() as u64,
            score: None,
            created_at: None,
            messages: if self.inline {
                Some(MessagePage {
                    data: self.messages.clone(),
                })
            } else {
                None
            },
        }
    }
}

/// Scripted transport: each `get_thread` call consumes the next snapshot;
/// the last snapshot repeats once the script runs out.
struct ScriptedTransport {
    script: Vec<Snapshot>,
    calls: Mutex<Calls>,
}

#[derive(Default)]
struct Calls {
    creates: usize,
    polls: usize,
    message_fetches: usize,
}

impl ScriptedTransport {
    fn new(script: Vec<Snapshot>) -> Self {
        assert!(!script.is_empty());
        Self {
            script,
            calls: Mutex::new(Calls::default()),
        }
    }

    fn polls(&self) -> usize {
        self.calls.lock().unwrap().polls
    }

    fn creates(&self) -> usize {
        self.calls.lock().unwrap().creates
    }

    fn message_fetches(&self) -> usize {
        self.calls.lock().unwrap().message_fetches
    }

    fn current(&self, poll_index: usize) -> &Snapshot {
        &self.script[poll_index.min(self.script.len() - 1)]
    }
}

#[async_trait]
impl ThreadTransport for ScriptedTransport {
    async fn create_thread(
        &self,
        _channel_id: &str,
        params: ThreadCreateParams,
    ) -> Result<Thread> {
        assert!(params.client_temp_id.starts_with("thread:"));
        let mut calls = self.calls.lock().unwrap();
        calls.creates += 1;
        Ok(Thread {
            id: "thr-1".to_string(),
            title: Some(params.title),
            state: ThreadState::Investigating,
            message_count: 0,
            score: None,
            created_at: None,
            messages: None,
        })
    }

    async fn get_thread(
        &self,
        _channel_id: &str,
        thread_id: &str,
        message_limit: u32,
    ) -> Result<Thread> {
        assert_eq!(thread_id, "thr-1");
        assert_eq!(message_limit, 10_000);
        let mut calls = self.calls.lock().unwrap();
        let snapshot = self.current(calls.polls);
        calls.polls += 1;
        Ok(snapshot.thread())
    }

    async fn get_thread_messages(
        &self,
        _channel_id: &str,
        thread_id: &str,
    ) -> Result<Vec<Message>> {
        assert_eq!(thread_id, "thr-1");
        let mut calls = self.calls.lock().unwrap();
        calls.message_fetches += 1;
        let snapshot = self.current(calls.polls.saturating_sub(1));
        Ok(snapshot.messages.clone())
    }
}

/// Transport whose polls always fail.
struct FailingTransport;

#[async_trait]
impl ThreadTransport for FailingTransport {
    async fn create_thread(
        &self,
        _channel_id: &str,
        params: ThreadCreateParams,
    ) -> Result<Thread> {
        Ok(Thread {
            id: "thr-1".to_string(),
            title: Some(params.title),
            state: ThreadState::Investigating,
            message_count: 0,
            score: None,
            created_at: None,
            messages: None,
        })
    }

    async fn get_thread(
        &self,
        _channel_id: &str,
        _thread_id: &str,
        _message_limit: u32,
    ) -> Result<Thread> {
        Err(Error::service_unavailable("backend down", None))
    }

    async fn get_thread_messages(
        &self,
        _channel_id: &str,
        _thread_id: &str,
    ) -> Result<Vec<Message>> {
        Err(Error::service_unavailable("backend down", None))
    }
}

fn ping_pong_script() -> Vec<Snapshot> {
    let investigating = Snapshot::new(
        ThreadState::Investigating,
        vec![Message::user_text("ping")],
    );
    let done = Snapshot::new(
        ThreadState::Done,
        vec![Message::user_text("ping"), Message::agent_text("pong")],
    );
    vec![
        investigating.clone(),
        investigating.clone(),
        investigating,
        done,
    ]
}

fn config(timeout_secs: u64, poll_secs: u64) -> RoundTripConfig {
    RoundTripConfig::default()
        .with_timeout(Duration::from_secs(timeout_secs))
        .with_poll_interval(Duration::from_secs(poll_secs))
}

#[tokio::test(start_paused = true)]
async fn ping_pong_round_trip() {
    let transport = ScriptedTransport::new(ping_pong_script());
    let result = send_and_await(&transport, "dm-sre", "ping", config(120, 5))
        .await
        .unwrap();
    assert_eq!(result.state, ThreadState::Done);
    assert_eq!(result.first_text_reply(), "pong");
    assert_eq!(transport.creates(), 1);
    // Three investigating polls plus the terminal one.
    assert_eq!(transport.polls(), 4);
    // Messages were inlined; the listing endpoint is never hit.
    assert_eq!(transport.message_fetches(), 0);
}

#[tokio::test(start_paused = true)]
async fn terminal_on_first_poll_when_two_messages_present() {
    let transport = ScriptedTransport::new(vec![Snapshot::new(
        ThreadState::Investigating,
        vec![Message::user_text("hi"), Message::agent_text("hello")],
    )]);
    let result = send_and_await(&transport, "dm-sre", "hi", config(120, 5))
        .await
        .unwrap();
    // Still investigating, but two messages means the reply landed.
    assert_eq!(result.state, ThreadState::Investigating);
    assert_eq!(result.first_text_reply(), "hello");
    assert_eq!(transport.polls(), 1);
}

#[tokio::test(start_paused = true)]
async fn timeout_yields_partial_results_as_data() {
    let transport = ScriptedTransport::new(vec![Snapshot::new(
        ThreadState::Investigating,
        vec![Message::user_text("slow question")],
    )]);
    let result = send_and_await(&transport, "dm-sre", "slow question", config(20, 5))
        .await
        .unwrap();
    assert!(result.timed_out());
    assert_eq!(result.state, ThreadState::Timeout);
    // The thread snapshot keeps the raw last-observed state.
    assert_eq!(result.thread.state, ThreadState::Investigating);
    // Partial messages are data, not an error.
    assert_eq!(result.messages.len(), 1);
    assert_eq!(
        result.first_text_reply(),
        "[no response yet - state: timeout]"
    );
}

#[tokio::test(start_paused = true)]
async fn timeout_ten_poll_five_makes_two_polls_and_a_final_fetch() {
    let transport = ScriptedTransport::new(vec![Snapshot::new(
        ThreadState::Investigating,
        vec![Message::user_text("q")],
    )]);
    let result = send_and_await(&transport, "dm-sre", "q", config(10, 5))
        .await
        .unwrap();
    assert!(result.timed_out());
    // Two in-loop polls (t=5, t=10) plus the final post-deadline fetch.
    assert_eq!(transport.polls(), 3);
}

#[tokio::test(start_paused = true)]
async fn returns_within_timeout_plus_one_interval() {
    let transport = ScriptedTransport::new(vec![Snapshot::new(
        ThreadState::Investigating,
        vec![Message::user_text("q")],
    )]);
    let start = tokio::time::Instant::now();
    let _ = send_and_await(&transport, "dm-sre", "q", config(20, 7))
        .await
        .unwrap();
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(20));
    assert!(elapsed <= Duration::from_secs(28));
}

#[tokio::test(start_paused = true)]
async fn falls_back_to_message_listing_when_inline_page_empty() {
    let transport = ScriptedTransport::new(vec![
        Snapshot::new(
            ThreadState::Done,
            vec![Message::user_text("hi"), Message::agent_text("hello")],
        )
        .without_inline(),
    ]);
    let result = send_and_await(&transport, "dm-sre", "hi", config(120, 5))
        .await
        .unwrap();
    assert_eq!(result.first_text_reply(), "hello");
    assert_eq!(transport.message_fetches(), 1);
}

#[tokio::test(start_paused = true)]
async fn first_text_reply_is_idempotent_and_skips_tool_parts() {
    let reply = Message {
        id: None,
        role: MessageRole::Agent,
        created_at: None,
        parts: vec![
            MessagePart::ToolUse {
                tool_name: "log_search".to_string(),
            },
            MessagePart::text("line one"),
            MessagePart::text("line two"),
        ],
    };
    let transport = ScriptedTransport::new(vec![Snapshot::new(
        ThreadState::Resolved,
        vec![Message::user_text("q"), reply],
    )]);
    let result = send_and_await(&transport, "dm-sre", "q", config(120, 5))
        .await
        .unwrap();
    assert_eq!(result.first_text_reply(), "line one\nline two");
    assert_eq!(result.first_text_reply(), "line one\nline two");
}

#[tokio::test(start_paused = true)]
async fn poll_errors_propagate_immediately() {
    let err = send_and_await(&FailingTransport, "dm-sre", "hi", config(120, 5))
        .await
        .unwrap_err();
    assert!(err.is_server_error());
}

#[tokio::test(start_paused = true)]
async fn empty_message_is_a_validation_error() {
    let transport = ScriptedTransport::new(ping_pong_script());
    let err = send_and_await(&transport, "dm-sre", "   ", config(120, 5))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(transport.creates(), 0);
}

#[tokio::test(start_paused = true)]
async fn zero_poll_interval_is_rejected_before_any_call() {
    let transport = ScriptedTransport::new(ping_pong_script());
    let err = send_and_await(&transport, "dm-sre", "hi", config(120, 0))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(transport.creates(), 0);
}

#[test]
fn dm_channel_naming() {
    assert_eq!(dm_channel("sre"), "dm-sre");
    assert_eq!(
        dm_channel("0b54e36e-55cd-4fac-a9e7-1f4b86a5f4f9"),
        "dm-0b54e36e-55cd-4fac-a9e7-1f4b86a5f4f9"
    );
}
