//! Error types for the Chatbox chat relay.
//!
//! Every error records the file and line where it was raised. The
//! [`ChatboxError`] wrapper aggregates them for crate boundaries, and
//! [`ChatboxError::user_message`] yields the location-free text that is
//! shown to end users.

mod config;
mod error;
mod http;
mod json;
mod not_found;
mod upstream;
mod validation;

pub use config::ConfigError;
pub use error::{ChatboxError, ChatboxErrorKind, ChatboxResult};
pub use http::HttpError;
pub use json::JsonError;
pub use not_found::NotFoundError;
pub use upstream::{UpstreamError, UpstreamErrorKind};
pub use validation::ValidationError;
