//! Generation provider trait and error type
//!
//! Defines the common interface for upstream text-generation backends.

use async_trait::async_trait;

/// Error types for generation operations
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Request failed (network, timeout, etc.)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Upstream returned a non-success status
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
    /// Upstream response carried no completion
    #[error("upstream response contained no completion")]
    EmptyCompletion,
}

/// A text-generation backend: one completion from a system + user prompt.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, GenerationError>;
}
