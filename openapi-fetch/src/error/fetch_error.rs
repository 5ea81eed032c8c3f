//! Top-level error returned by a dispatch call.

use thiserror::Error;

use super::{ApiError, BoxError, CodecError, ConfigError, SchemaViolation, TransportError};

/// Top-level error type for all dispatch operations.
///
/// A call fails only when no response could be obtained or it could not be
/// encoded/decoded. A non-2xx status is a normal response; the `Status`
/// variant appears only when the caller opts in through
/// [`ApiResponse::error_for_status`](crate::ApiResponse::error_for_status).
///
/// ## Examples
///
/// ```rust,ignore
/// use openapi_fetch::FetchError;
///
/// fn handle_error(err: FetchError) {
///     match err {
///         FetchError::Transport(e) => eprintln!("Network error: {e}"),
///         FetchError::Codec(e) => eprintln!("Codec error: {e}"),
///         FetchError::Schema(e) => eprintln!("Rejected call: {e}"),
///         FetchError::Config(e) => eprintln!("Configuration error: {e}"),
///         FetchError::HeaderProvider(e) => eprintln!("Header provider failed: {e}"),
///         FetchError::Status(e) => eprintln!("HTTP {}: {}", e.status, e.message),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport failed before a response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Body encoding or response decoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The call was rejected by the runtime route schema.
    #[error(transparent)]
    Schema(#[from] SchemaViolation),

    /// Configuration or request construction failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The default header provider failed.
    #[error("Header provider failed: {0}")]
    HeaderProvider(#[source] BoxError),

    /// A non-2xx response, raised on request by the caller.
    #[error(transparent)]
    Status(#[from] ApiError),
}

impl FetchError {
    /// Wraps this error in the [`ApiError`] shape.
    ///
    /// Transport failures become network errors with status `0`; an HTTP
    /// status error is returned as is. Other failures return `None`.
    pub fn to_api_error(&self) -> Option<ApiError> {
        match self {
            Self::Transport(e) => Some(ApiError::from_network_error(e)),
            Self::Status(e) => Some(e.clone()),
            _ => None,
        }
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(e) => Some(e.status),
            Self::Transport(TransportError::Request(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
