//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the chatbox binary.

mod chat;
mod commands;
mod notes;
mod serve;

pub use chat::handle_chat_command;
pub use commands::{Cli, Commands};
pub use notes::{handle_notes_command, render_json};
pub use serve::handle_serve_command;
