//! Request body encoding and response decoding.
//!
//! Content negotiation is an exact string match against a small table; no
//! wildcard or parameter parsing is done, so `application/json` and
//! `application/json; charset=utf-8` are different keys.
//!
//! | Direction | Content type                      | Behavior                      |
//! |-----------|-----------------------------------|-------------------------------|
//! | request   | none                              | no body                       |
//! | request   | `application/json`                | JSON-serialized `data`        |
//! | request   | `application/json; charset=utf-8` | JSON-serialized `data`        |
//! | response  | none                              | status and headers only       |
//! | response  | `text/plain; charset=utf-8`       | text body, headers dropped    |
//! | response  | `application/json; charset=utf-8` | parsed JSON body with headers |
//!
//! Anything else fails with [`CodecError::UnsupportedContentType`].

use bytes::Bytes;
use tracing::debug;

use crate::error::{CodecDirection, CodecError};
use crate::response::{ApiResponse, ResponseData};
use crate::transport::RawResponse;
use crate::BoxFuture;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_JSON_UTF8: &str = "application/json; charset=utf-8";
pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// Serializes call data into a request body.
pub trait BodyEncoder: Send + Sync {
    /// Encodes `data` for `content_type`.
    ///
    /// Returns `Ok(None)` when no body should be sent.
    fn encode(
        &self,
        data: Option<&serde_json::Value>,
        content_type: Option<&str>,
    ) -> Result<Option<Bytes>, CodecError>;
}

/// Turns a raw response into an [`ApiResponse`].
pub trait ResponseDecoder: Send + Sync {
    /// Decodes `response`; `content_type` is its raw `content-type` header.
    fn decode(
        &self,
        response: RawResponse,
        content_type: Option<String>,
    ) -> BoxFuture<'_, Result<ApiResponse, CodecError>>;
}

/// The built-in encoder and decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCodec;

impl BodyEncoder for DefaultCodec {
    fn encode(
        &self,
        data: Option<&serde_json::Value>,
        content_type: Option<&str>,
    ) -> Result<Option<Bytes>, CodecError> {
        let Some(content_type) = content_type else {
            return Ok(None);
        };

        match content_type {
            APPLICATION_JSON | APPLICATION_JSON_UTF8 => {
                // Absent data serializes to no body at all, not to `null`.
                let Some(data) = data else {
                    return Ok(None);
                };
                let encoded = serde_json::to_vec(data).map_err(CodecError::JsonEncode)?;
                debug!(content_type, bytes = encoded.len(), "Encoded JSON request body");
                Ok(Some(Bytes::from(encoded)))
            }
            other => Err(CodecError::unsupported(CodecDirection::Request, Some(other))),
        }
    }
}

impl ResponseDecoder for DefaultCodec {
    fn decode(
        &self,
        response: RawResponse,
        content_type: Option<String>,
    ) -> BoxFuture<'_, Result<ApiResponse, CodecError>> {
        Box::pin(async move { decode_default(response, content_type) })
    }
}

fn decode_default(
    response: RawResponse,
    content_type: Option<String>,
) -> Result<ApiResponse, CodecError> {
    let RawResponse {
        status,
        headers,
        body,
        ..
    } = response;

    match content_type.as_deref() {
        None => Ok(ApiResponse::no_content(status, Some(headers))),
        Some(TEXT_PLAIN_UTF8) => {
            // Malformed sequences become U+FFFD instead of failing the call.
            let text = String::from_utf8_lossy(&body).into_owned();
            Ok(ApiResponse::with_content(
                status,
                TEXT_PLAIN_UTF8,
                ResponseData::Text(text),
                None,
            ))
        }
        Some(APPLICATION_JSON_UTF8) => {
            let value = serde_json::from_slice(&body).map_err(CodecError::JsonDecode)?;
            Ok(ApiResponse::with_content(
                status,
                APPLICATION_JSON_UTF8,
                ResponseData::Json(value),
                Some(headers),
            ))
        }
        Some(other) => Err(CodecError::unsupported(CodecDirection::Response, Some(other))),
    }
}
