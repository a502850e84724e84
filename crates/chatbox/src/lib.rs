//! Chatbox: a streaming chat relay in front of Gemini.
//!
//! This crate re-exports the workspace crates behind one name and hosts the
//! `chatbox` binary's command handlers.
//!
//! ```no_run
//! use chatbox::{ChatClient, ClientConfig, Conversation};
//!
//! # async fn demo() -> chatbox::ChatboxResult<()> {
//! let client = ChatClient::connect(ClientConfig::default());
//! let mut conversation = Conversation::new();
//! client
//!     .submit(&mut conversation, "Hello!", |chunk| print!("{}", chunk))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;

pub use chatbox_client::{
    AttemptState, ChatClient, ChatResponse, ChatTransport, ClientConfig, ClientConfigBuilder,
    Conversation, EXHAUSTED_NOTICE, HttpTransport, RetryConfig, RetryConfigBuilder,
    SubmissionReport,
};
pub use chatbox_core::{GenerationConfig, HISTORY_WINDOW, Role, Turn, history_window};
pub use chatbox_error::{ChatboxError, ChatboxErrorKind, ChatboxResult};
pub use chatbox_models::{ChatDriver, FragmentStream, GeminiClient, GeminiConfig};
pub use chatbox_server::{
    AppState, RelayOptions, STREAM_INTERRUPTED_NOTICE, ServerConfig, create_router, serve,
};
pub use chatbox_store::{
    InMemoryTodoStore, ListNotesInput, ListNotesOutput, Note, NoteCatalog, NoteFilter, Todo,
    TodoStore,
};

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Output goes to
/// stderr so streamed replies on stdout stay clean.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
