//! Generation parameters and requests.

use crate::Turn;
use serde::{Deserialize, Serialize};

/// Sampling parameters passed verbatim to the upstream provider.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[serde(default)]
#[builder(default)]
pub struct GenerationConfig {
    /// Sampling temperature
    temperature: f32,
    /// Nucleus sampling bound
    top_p: f32,
    /// Top-k sampling bound
    top_k: u32,
    /// Output token budget
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_p: 1.0,
            top_k: 1,
            max_output_tokens: 2048,
        }
    }
}

impl GenerationConfig {
    /// Returns a builder seeded with the default parameters.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }
}

/// One generation: the turns to send and how to sample.
///
/// Created per submission and consumed once by a driver.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Ordered turns, already windowed
    turns: Vec<Turn>,
    /// Sampling parameters
    #[builder(default)]
    generation: GenerationConfig,
}

impl GenerateRequest {
    /// Creates a request from turns and parameters.
    pub fn new(turns: Vec<Turn>, generation: GenerationConfig) -> Self {
        Self { turns, generation }
    }

    /// Returns a builder for constructing a GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}
