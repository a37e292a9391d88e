//! Typed errors for the upstream chat-completion call

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    /// No credential was configured at process start
    #[error("{} is not set.", crate::core::config::API_KEY_ENV)]
    MissingApiKey,

    /// Upstream answered with a non-success status; `details` is its raw body
    #[error("Upstream returned {status}: {details}")]
    Upstream {
        status: reqwest::StatusCode,
        details: String,
    },

    /// Connection refused, DNS failure, reset, timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream said 200 but the body was not a chat completion
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    pub fn from_network_error(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Network(format!("Request timeout: {}", e))
        } else if e.is_connect() {
            LlmError::Network(format!("Connection failed: {}", e))
        } else {
            LlmError::Network(e.to_string())
        }
    }
}
