//! Layered error types for the fetch crate.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`FetchError`] - Top-level error type returned by a dispatch call
//! - [`ApiError`] - An HTTP-level failure (non-2xx status or network failure)
//! - [`TransportError`] - Failures raised by the transport itself
//! - [`CodecError`] - Request body encoding and response decoding errors
//! - [`SchemaViolation`] - A call rejected by the runtime route schema
//! - [`ConfigError`] - Dispatcher configuration errors

mod api_error;
mod codec_error;
mod config_error;
mod fetch_error;
mod schema_violation;
mod transport_error;

pub use api_error::ApiError;
pub use codec_error::{CodecDirection, CodecError};
pub use config_error::ConfigError;
pub use fetch_error::FetchError;
pub use schema_violation::SchemaViolation;
pub use transport_error::TransportError;

/// Boxed error returned by user-supplied capabilities such as header providers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
