//! HTTP-level failure value handed to the `on_error` hook.

use thiserror::Error;

use crate::transport::RawResponse;

/// An HTTP-level failure.
///
/// Built when a response status falls outside the 2xx range (see
/// [`ApiError::from_response`]) or when the transport failed before any
/// response was received (see [`ApiError::from_network_error`], status `0`).
///
/// The dispatcher passes this value to the configured `on_error` hook; it
/// does not return it. Callers that want non-2xx responses to fail the call
/// use [`ApiResponse::error_for_status`](crate::ApiResponse::error_for_status).
///
/// ## Examples
///
/// ```rust
/// use openapi_fetch::ApiError;
///
/// let err = ApiError::new("Not Found", 404);
/// assert!(err.is_client_error());
/// assert_eq!(err.to_string(), "Not Found");
/// ```
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable description.
    pub message: String,
    /// HTTP status, or `0` for a network-level failure.
    pub status: u16,
    /// The response that triggered the error, if one was received.
    pub response: Option<RawResponse>,
    /// Any body decoded before the error was constructed.
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    /// Creates an error with no attached response or data.
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
            response: None,
            data: None,
        }
    }

    /// Creates an error from a received HTTP response.
    ///
    /// The message is the response's status text, or `HTTP <status>` when
    /// the status text is empty.
    pub fn from_response(response: &RawResponse, data: Option<serde_json::Value>) -> Self {
        let message = match response.status_text.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format!("HTTP {}", response.status),
        };

        Self {
            message,
            status: response.status,
            response: Some(response.clone()),
            data,
        }
    }

    /// Wraps a network-level failure. The status is `0`.
    pub fn from_network_error(error: &(dyn std::error::Error + 'static)) -> Self {
        Self::new(format!("Network error: {error}"), 0)
    }

    /// Returns `true` if no response was received.
    pub fn is_network_error(&self) -> bool {
        self.status == 0
    }

    /// Returns `true` for 4xx statuses.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Returns `true` for 5xx statuses.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use reqwest::header::HeaderMap;

    fn raw(status: u16, status_text: Option<&str>) -> RawResponse {
        RawResponse {
            status,
            status_text: status_text.map(str::to_string),
            headers: HeaderMap::new(),
            body: bytes::Bytes::new(),
        }
    }

    #[test]
    fn test_from_response_uses_status_text() {
        let err = ApiError::from_response(&raw(404, Some("Not Found")), None);
        assert_eq!(err.message, "Not Found");
        assert_eq!(err.status, 404);
        assert_eq!(err.response.as_ref().map(|r| r.status), Some(404));
        assert!(err.data.is_none());
    }

    #[test]
    fn test_from_response_without_status_text() {
        let err = ApiError::from_response(&raw(599, None), None);
        assert_eq!(err.message, "HTTP 599");

        let err = ApiError::from_response(&raw(520, Some("")), None);
        assert_eq!(err.message, "HTTP 520");
    }

    #[test]
    fn test_from_response_keeps_data() {
        let data = serde_json::json!({"error": "boom"});
        let err = ApiError::from_response(&raw(500, Some("Internal Server Error")), Some(data.clone()));
        assert_eq!(err.data, Some(data));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_from_network_error() {
        let transport = TransportError::Connection("connection refused".to_string());
        let err = ApiError::from_network_error(&transport);
        assert_eq!(err.status, 0);
        assert!(err.is_network_error());
        assert_eq!(err.message, "Network error: Connection failed: connection refused");
        assert!(err.response.is_none());
    }
}
