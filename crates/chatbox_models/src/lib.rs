//! Upstream generative-language drivers for Chatbox.
//!
//! [`ChatDriver`] is the seam between the HTTP relay and a provider. The
//! only provider shipped is [`GeminiClient`].

mod driver;
mod gemini;

pub use driver::{ChatDriver, FragmentStream};
pub use gemini::{
    Content, DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, GeminiConfig, GeminiConfigBuilder,
    GenerateContentRequest, GenerationConfigDto, Part, gemini_role,
};
