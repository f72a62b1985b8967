//! Generation-service seam used by the orchestrator.

use async_trait::async_trait;
use thiserror::Error;

/// Produces free-form role suggestions for a prompt.
#[async_trait]
pub trait RoleGenerator: Send + Sync {
    /// Single request/response exchange; no retries.
    async fn generate(&self, system: &str, prompt: &str) -> anyhow::Result<String>;
}

/// Transport and protocol failures of the chat completions client.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Non-success HTTP status.
    #[error("generation service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// Response body was not a chat completion.
    #[error("generation response parse error: {reason}; body: {body}")]
    Parse {
        /// Decoder error.
        reason: String,
        /// Response body text.
        body: String,
    },

    /// Completion carried no choices.
    #[error("generation response has no choices")]
    NoChoices,

    /// First choice had no text.
    #[error("generation response has no text content")]
    EmptyContent,
}
