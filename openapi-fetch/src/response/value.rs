//! The decoded response value.

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, CodecError};

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    /// Parsed JSON body.
    Json(serde_json::Value),
    /// UTF-8 text body.
    Text(String),
}

impl ResponseData {
    /// Converts the body into a JSON value; text becomes a JSON string.
    pub fn into_value(self) -> serde_json::Value {
        match self {
            Self::Json(v) => v,
            Self::Text(s) => serde_json::Value::String(s),
        }
    }
}

/// A response body together with the content type it was decoded from.
///
/// The two only ever travel together: a response has either both or
/// neither.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseContent {
    /// The `content-type` header exactly as received.
    pub content_type: String,
    pub data: ResponseData,
}

/// The decoded result of a dispatch call.
///
/// Non-2xx statuses are ordinary values of this type. Use
/// [`is_success`](Self::is_success) or
/// [`error_for_status`](Self::error_for_status) to branch on them.
///
/// ## Examples
///
/// ```rust
/// use openapi_fetch::{ApiResponse, ResponseData};
///
/// let response = ApiResponse::with_content(
///     200,
///     "application/json; charset=utf-8",
///     ResponseData::Json(serde_json::json!({"a": 1})),
///     None,
/// );
/// assert_eq!(response.content_type(), Some("application/json; charset=utf-8"));
/// assert_eq!(response.json::<serde_json::Value>().unwrap()["a"], 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content: Option<ResponseContent>,
    /// Response headers. The default text decoder does not attach them.
    pub headers: Option<HeaderMap>,
}

impl ApiResponse {
    /// A response without a body.
    pub fn no_content(status: u16, headers: Option<HeaderMap>) -> Self {
        Self {
            status,
            content: None,
            headers,
        }
    }

    /// A response carrying a decoded body.
    pub fn with_content(
        status: u16,
        content_type: impl Into<String>,
        data: ResponseData,
        headers: Option<HeaderMap>,
    ) -> Self {
        Self {
            status,
            content: Some(ResponseContent {
                content_type: content_type.into(),
                data,
            }),
            headers,
        }
    }

    /// Returns `true` when the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content.as_ref().map(|c| c.content_type.as_str())
    }

    pub fn data(&self) -> Option<&ResponseData> {
        self.content.as_ref().map(|c| &c.data)
    }

    /// Returns the body when it was decoded as text.
    pub fn text(&self) -> Option<&str> {
        match self.data() {
            Some(ResponseData::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns a response header if headers were kept and the value is ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()
            .and_then(|h| h.get(name))
            .and_then(|v| v.to_str().ok())
    }

    /// Collects the named headers that are present, keyed by the given names.
    ///
    /// Used by typed responses whose schema declares response headers.
    pub fn declared_headers(&self, names: &[&str]) -> BTreeMap<String, String> {
        names
            .iter()
            .filter_map(|name| {
                self.header(name)
                    .map(|value| ((*name).to_string(), value.to_string()))
            })
            .collect()
    }

    /// Deserializes the body into `T`.
    ///
    /// ## Errors
    ///
    /// Returns [`CodecError::UnexpectedResponse`] when the response has no
    /// body, or [`CodecError::JsonDecode`] when it does not fit `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        let Some(content) = &self.content else {
            return Err(CodecError::UnexpectedResponse {
                status: self.status,
                message: "response has no content".to_string(),
            });
        };

        let value = content.data.clone().into_value();
        serde_json::from_value(value).map_err(CodecError::JsonDecode)
    }

    /// Converts a non-2xx response into an [`ApiError`].
    ///
    /// The dispatcher itself never does this; it is the opt-in for callers
    /// that want HTTP failures to fail the call.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            return Ok(self);
        }

        let message = StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", self.status));

        Err(ApiError {
            message,
            status: self.status,
            response: None,
            data: self.content.map(|c| c.data.into_value()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Item {
        id: u64,
    }

    #[test]
    fn test_no_content_has_neither_type_nor_data() {
        let response = ApiResponse::no_content(204, Some(HeaderMap::new()));
        assert_eq!(response.content_type(), None);
        assert_eq!(response.data(), None);
        assert!(response.headers.is_some());
    }

    #[test]
    fn test_json_deserializes_body() {
        let response = ApiResponse::with_content(
            200,
            "application/json; charset=utf-8",
            ResponseData::Json(json!({"id": 7})),
            None,
        );
        assert_eq!(response.json::<Item>().unwrap(), Item { id: 7 });
    }

    #[test]
    fn test_json_on_empty_response_fails() {
        let response = ApiResponse::no_content(204, None);
        let err = response.json::<Item>().unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedResponse { status: 204, .. }));
    }

    #[test]
    fn test_text_body_as_json_string() {
        let response = ApiResponse::with_content(
            200,
            "text/plain; charset=utf-8",
            ResponseData::Text("hello".to_string()),
            None,
        );
        assert_eq!(response.text(), Some("hello"));
        assert_eq!(response.json::<String>().unwrap(), "hello");
    }

    #[test]
    fn test_declared_headers_picks_present_names() {
        let mut headers = HeaderMap::new();
        headers.insert("x-rate-limit", "100".parse().unwrap());
        headers.insert("x-other", "ignored".parse().unwrap());
        let response = ApiResponse::no_content(200, Some(headers));

        let picked = response.declared_headers(&["X-Rate-Limit", "X-Expires-After"]);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked["X-Rate-Limit"], "100");
    }

    #[test]
    fn test_error_for_status_passes_success() {
        let response = ApiResponse::no_content(201, None);
        assert!(response.error_for_status().is_ok());
    }

    #[test]
    fn test_error_for_status_converts_failure() {
        let response = ApiResponse::with_content(
            404,
            "application/json; charset=utf-8",
            ResponseData::Json(json!({"message": "missing"})),
            None,
        );
        let err = response.error_for_status().unwrap_err();
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Not Found");
        assert_eq!(err.data, Some(json!({"message": "missing"})));
    }

    #[test]
    fn test_error_for_status_unknown_reason() {
        let err = ApiResponse::no_content(599, None)
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.message, "HTTP 599");
    }
}
