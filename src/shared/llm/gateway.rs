use async_trait::async_trait;
use thiserror::Error;

/// A single inference call: system instruction plus the user payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    /// Instruction describing the reply schema
    pub system: String,
    /// The composed prompt
    pub prompt: String,
}

/// Errors returned by an inference gateway
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Provider returned HTTP {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl InferenceError {
    /// Whether reissuing the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            InferenceError::Transport(_) | InferenceError::Timeout => true,
            InferenceError::Provider { status, .. } => *status == 429 || *status >= 500,
            InferenceError::InvalidResponse(_) => false,
        }
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            InferenceError::Timeout
        } else if e.is_decode() {
            InferenceError::InvalidResponse(e.to_string())
        } else {
            InferenceError::Transport(e.to_string())
        }
    }
}

/// Capability interface for a hosted language model.
///
/// Implementations return the raw text of the model's reply; parsing into a
/// structured value happens in the caller.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Provider name, for logs
    fn name(&self) -> &str;

    async fn generate(&self, request: &InferenceRequest) -> Result<String, InferenceError>;
}
