//! Text-generation model providers.
//!
//! The generator only needs "prompt in, text out". [`TextModel`] is that
//! seam; [`GeminiClient`] is the production implementation and tests swap
//! in mocks.

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

/// Sampling parameters sent with every generation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

/// A single prompt submission
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Provider model identifier, e.g. `gemini-2.0-flash`
    pub model: String,
    pub prompt: String,
    pub params: GenerationParams,
}

/// Provider-side failures
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request never completed (DNS, TLS, connection reset, bad body)
    #[error("Model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Model API returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Prompt rejected by the provider's safety filter
    #[error("Prompt blocked by provider: {0}")]
    Blocked(String),

    /// Response carried no text
    #[error("Model returned an empty response")]
    EmptyResponse,
}

/// Asynchronous text-generation capability
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Submit a prompt and return the model's raw text
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;
}
