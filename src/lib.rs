// Public modules
pub mod auth;
pub mod chat;
pub mod client;
pub mod credentials;
pub mod error;
pub mod mcp;
pub mod observability;
pub mod prompts;
pub mod render;
pub mod roundtrip;
pub mod types;
pub mod utils;

// Re-exports
pub use auth::AuthSession;
pub use client::{AiTeam, ClientOptions};
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use roundtrip::{
    RoundTripConfig, RoundTripResult, ThreadTransport, dm_channel, send_and_await,
};
pub use types::*;
