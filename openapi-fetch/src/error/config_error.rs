//! Dispatcher configuration errors.

use thiserror::Error;

/// Errors in dispatcher configuration or in call-time values that must be
/// valid before a request can be built (URLs, header names).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required configuration field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A header name or value cannot be sent over HTTP.
    #[error("Invalid header {name:?}: {message}")]
    InvalidHeader { name: String, message: String },

    /// A route schema document could not be parsed.
    #[error("Invalid route schema: {0}")]
    InvalidSchema(String),
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.to_string(),
        }
    }
}
