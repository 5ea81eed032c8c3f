//! Request encoding and response decoding errors.

use strum::Display;
use thiserror::Error;

/// Which side of the exchange a codec was working on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CodecDirection {
    Request,
    Response,
}

/// Errors raised while encoding a request body or decoding a response.
///
/// Every variant is fatal for the call that raised it; nothing is retried.
#[derive(Debug, Error)]
pub enum CodecError {
    /// No codec is registered for this content type.
    ///
    /// `content_type` is `None` only when a decoder requires a content type
    /// and the response carried none.
    #[error("Unsupported {direction} content type: {}", content_type.as_deref().unwrap_or("<none>"))]
    UnsupportedContentType {
        direction: CodecDirection,
        content_type: Option<String>,
    },

    /// Serializing the request body to JSON failed.
    #[error("JSON encode error: {0}")]
    JsonEncode(#[source] serde_json::Error),

    /// The response body was not valid JSON.
    #[error("JSON decode error: {0}")]
    JsonDecode(#[source] serde_json::Error),

    /// A typed parameter section did not serialize to a key/value object.
    #[error("Invalid {section} parameters: {message}")]
    InvalidParameters {
        /// `path`, `query` or `header`.
        section: &'static str,
        message: String,
    },

    /// A decoded response did not match the shape its route declares.
    #[error("Unexpected response for status {status}: {message}")]
    UnexpectedResponse { status: u16, message: String },
}

impl CodecError {
    /// Creates an unsupported content type error.
    pub fn unsupported(direction: CodecDirection, content_type: Option<&str>) -> Self {
        Self::UnsupportedContentType {
            direction,
            content_type: content_type.map(str::to_string),
        }
    }

    /// Returns `true` if this is a content negotiation failure.
    pub fn is_unsupported_content_type(&self) -> bool {
        matches!(self, Self::UnsupportedContentType { .. })
    }
}
