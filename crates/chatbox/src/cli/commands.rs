//! Argument definitions.

use chatbox_client::DEFAULT_SERVER_URL;
use chatbox_store::NoteFilter;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Streaming Gemini chat relay.
#[derive(Parser, Debug)]
#[command(name = "chatbox")]
#[command(about = "Streaming Gemini chat relay with todo and note endpoints")]
#[command(version)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Configuration file (defaults to ./chatbox.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Listen address, overriding the configuration
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Chat with a running server
    Chat {
        /// Server base URL
        #[arg(short, long, default_value = DEFAULT_SERVER_URL)]
        server: String,

        /// Message to send; starts an interactive session when omitted
        message: Option<String>,
    },

    /// Search the note catalog
    Notes {
        /// Case-insensitive text to look for in titles and contents
        #[arg(short, long)]
        query: Option<String>,

        /// Status filter: all, completed or pending
        #[arg(short, long, default_value = "all")]
        filter: NoteFilter,

        /// Maximum number of notes to return (1-100)
        #[arg(short = 'n', long, default_value_t = 10)]
        max_results: u32,
    },
}
