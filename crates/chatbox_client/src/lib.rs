//! Caller side of the Chatbox chat endpoint.
//!
//! [`ChatClient::submit`] appends the user's message to a local
//! [`Conversation`], sends the trailing history window through a
//! [`ChatTransport`], backs off exponentially on rate limiting, and streams
//! the reply into the conversation as it arrives.

mod client;
mod config;
mod conversation;
mod decoder;
mod state;
mod transport;

pub use client::{ChatClient, EXHAUSTED_NOTICE, SubmissionReport, failure_notice};
pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_SERVER_URL, RetryConfig, RetryConfigBuilder,
};
pub use conversation::Conversation;
pub use decoder::Utf8Decoder;
pub use state::AttemptState;
pub use transport::{ChatResponse, ChatTransport, ChunkStream, HttpTransport, failure_message};
