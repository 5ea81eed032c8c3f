//! Transport and network errors.

use thiserror::Error;

/// Errors raised by a [`Transport`](crate::Transport) while sending a request.
///
/// A transport error means no HTTP response was obtained. Non-2xx statuses
/// are never reported through this type.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {duration_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        duration_ms: u64,
    },

    /// Failed to establish connection to the server.
    #[error("Connection failed: {0}")]
    Connection(String),
}

impl TransportError {
    /// Returns `true` if the request was abandoned because it timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Request(e) => e.is_timeout(),
            Self::Connection(_) => false,
        }
    }

    /// Returns `true` if no connection could be made to the server.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Request(e) => e.is_connect(),
            Self::Timeout { .. } => false,
        }
    }
}
