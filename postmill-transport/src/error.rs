//! Transport error types.

use postmill_core::ProviderError;
use thiserror::Error;

/// Network-level failure before a complete response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request error reported by the HTTP client.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The system random number generator failed.
    #[error("System random number generator unavailable")]
    Random,

    /// A scripted transport ran out of responses.
    #[error("No response scripted for {0}")]
    Unscripted(String),
}

impl From<TransportError> for ProviderError {
    fn from(e: TransportError) -> Self {
        ProviderError::Transport(e.to_string())
    }
}
