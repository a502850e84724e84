//! Google Gemini driver.
//!
//! Talks to the Generative Language REST API's `streamGenerateContent`
//! method with `alt=sse`, mapping the local `assistant` role to Gemini's
//! `model` role.

mod client;
mod conversions;
mod dto;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, GeminiConfig, GeminiConfigBuilder};
pub use conversions::gemini_role;
pub use dto::{Content, GenerateContentRequest, GenerationConfigDto, Part};
