//! Core data types for the Chatbox chat relay.
//!
//! This crate provides the conversation model shared by the server, the
//! upstream drivers and the chat client.

mod generation;
mod history;
mod role;
mod turn;

pub use generation::{
    GenerateRequest, GenerateRequestBuilder, GenerationConfig, GenerationConfigBuilder,
};
pub use history::{HISTORY_WINDOW, ensure_ends_with_user, history_window};
pub use role::Role;
pub use turn::{Turn, TurnBuilder};
