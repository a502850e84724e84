//! HTTP surface of Chatbox.
//!
//! Serves the streaming chat endpoint backed by a [`ChatDriver`], the todo
//! CRUD endpoints and the note listing. Build a router with
//! [`create_router`] for in-process use, or run a configured server with
//! [`serve`].
//!
//! [`ChatDriver`]: chatbox_models::ChatDriver

mod config;
mod error;
mod relay;
mod routes;
mod server;
mod state;

pub use config::{DEFAULT_BIND_ADDR, ServerConfig, ServerConfigBuilder};
pub use error::ApiError;
pub use relay::{RelayOptions, RelayOptionsBuilder, STREAM_INTERRUPTED_NOTICE, relay};
pub use routes::{MODEL_HEADER, create_router};
pub use server::serve;
pub use state::AppState;
