//! Generative model collaborator boundary.
//!
//! The heavy lifting (tokenization, autoregressive generation) lives in an
//! external model host. This module defines the seam the pipelines talk
//! through plus an HTTP client for a llama.cpp-style completion server.

pub mod llama_server;

use async_trait::async_trait;
use thiserror::Error;

pub use llama_server::LlamaServerClient;

/// Errors from the model collaborator.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model server error: {status} - {body}")]
    Api { status: u16, body: String },
    #[error("task join error: {0}")]
    Join(String),
}

/// A handle to a text-generation backend. Construct once at startup and
/// share by `Arc`; implementations must be safe to call concurrently.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run a completion for the rendered prompt and return the decoded
    /// text. Whether the prompt is echoed back ahead of the generation is
    /// backend-specific; callers strip echoes with an echo marker.
    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String, ModelError>;
}
