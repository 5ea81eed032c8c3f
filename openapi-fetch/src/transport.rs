//! Pluggable HTTP transport.
//!
//! The dispatcher never talks to the network directly. It hands a
//! [`TransportRequest`] to a [`Transport`] and receives a fully buffered
//! [`RawResponse`]. [`ReqwestTransport`] is the default; tests and callers
//! with special needs substitute their own, either by implementing the trait
//! or by wrapping a closure with [`transport_fn`].

use std::borrow::Cow;
use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Method;
use url::Url;

use crate::error::TransportError;
use crate::BoxFuture;

/// Request options handed to the transport.
///
/// This is the value a [`FetchOptions`](crate::FetchOptions) override or
/// replacement function operates on.
#[derive(Debug, Clone)]
pub struct RequestInit {
    /// The request method, already upper-cased.
    pub method: Method,
    /// Fully assembled request headers.
    pub headers: HeaderMap,
    /// Encoded request body, if any.
    pub body: Option<Bytes>,
    /// Per-request timeout. Cancellation is left to the transport.
    pub timeout: Option<Duration>,
}

impl RequestInit {
    /// Creates request options with no headers, body or timeout.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }
}

/// A resolved URL plus the options to send it with.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: Url,
    pub init: RequestInit,
}

/// A received HTTP response with its body fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// The reason phrase, when the transport knows one.
    pub status_text: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    /// Returns `true` when the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns a header value if it is present and visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The raw `content-type` header as received.
    ///
    /// Bytes outside visible ASCII are replaced rather than hiding the
    /// header, so an unreadable content type still reaches the decoder.
    pub fn content_type(&self) -> Option<Cow<'_, str>> {
        self.headers
            .get(CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()))
    }
}

/// Sends a request and returns the buffered response.
///
/// Implementations must only fail when no HTTP response was obtained; a
/// non-2xx status is a successful send.
pub trait Transport: Send + Sync {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<RawResponse, TransportError>>;
}

/// Default transport built on `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Wraps an existing `reqwest` client.
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Builds a client with the given overall timeout and pooled connections.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self {
            client,
            timeout: Some(timeout),
        })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<RawResponse, TransportError>> {
        Box::pin(async move {
            let TransportRequest { url, init } = request;
            let timeout = init.timeout.or(self.timeout);

            let mut builder = self.client.request(init.method, url).headers(init.headers);
            if let Some(body) = init.body {
                builder = builder.body(body);
            }
            if let Some(timeout) = init.timeout {
                builder = builder.timeout(timeout);
            }

            let response = builder.send().await.map_err(|e| classify(e, timeout))?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await.map_err(|e| classify(e, timeout))?;

            Ok(RawResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().map(str::to_string),
                headers,
                body,
            })
        })
    }
}

/// Reports an elapsed timeout with its configured duration.
fn classify(error: reqwest::Error, timeout: Option<Duration>) -> TransportError {
    match timeout {
        Some(timeout) if error.is_timeout() => TransportError::Timeout {
            duration_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        },
        _ => TransportError::Request(error),
    }
}

/// A [`Transport`] backed by a closure. See [`transport_fn`].
#[derive(Clone)]
pub struct TransportFn<F>(F);

impl<F> std::fmt::Debug for TransportFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportFn").finish_non_exhaustive()
    }
}

/// Wraps an async closure as a [`Transport`].
///
/// ## Examples
///
/// ```rust
/// use openapi_fetch::{transport_fn, RawResponse, TransportRequest};
///
/// let transport = transport_fn(|request: TransportRequest| async move {
///     Ok(RawResponse {
///         status: 204,
///         status_text: Some("No Content".to_string()),
///         headers: Default::default(),
///         body: Default::default(),
///     })
/// });
/// ```
pub fn transport_fn<F, Fut>(f: F) -> TransportFn<F>
where
    F: Fn(TransportRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<RawResponse, TransportError>> + Send + 'static,
{
    TransportFn(f)
}

impl<F, Fut> Transport for TransportFn<F>
where
    F: Fn(TransportRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<RawResponse, TransportError>> + Send + 'static,
{
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<RawResponse, TransportError>> {
        Box::pin((self.0)(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_raw_response_content_type_is_raw() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        let response = RawResponse {
            status: 200,
            status_text: None,
            headers,
            body: Bytes::new(),
        };
        assert_eq!(
            response.content_type().as_deref(),
            Some("application/json; charset=utf-8")
        );
        assert!(response.is_success());
    }

    #[test]
    fn test_raw_response_keeps_non_ascii_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_bytes(b"text/plain; charset=\xe9").unwrap(),
        );
        let response = RawResponse {
            status: 200,
            status_text: None,
            headers,
            body: Bytes::from_static(b"important body"),
        };
        assert_eq!(
            response.content_type().as_deref(),
            Some("text/plain; charset=\u{fffd}")
        );
    }

    #[test]
    fn test_raw_response_success_range() {
        let mut response = RawResponse {
            status: 299,
            status_text: None,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        };
        assert!(response.is_success());
        response.status = 300;
        assert!(!response.is_success());
        response.status = 199;
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_reqwest_transport_sends_init() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/things/1"))
            .and(header("x-trace", "abc"))
            .and(body_string("payload"))
            .respond_with(ResponseTemplate::new(202).set_body_string("accepted"))
            .mount(&mock_server)
            .await;

        let mut init = RequestInit::new(Method::PUT);
        init.headers.insert("x-trace", HeaderValue::from_static("abc"));
        init.body = Some(Bytes::from_static(b"payload"));

        let url = Url::parse(&format!("{}/things/1", mock_server.uri())).unwrap();
        let response = ReqwestTransport::default()
            .send(TransportRequest { url, init })
            .await
            .unwrap();

        assert_eq!(response.status, 202);
        assert_eq!(response.status_text.as_deref(), Some("Accepted"));
        assert_eq!(response.body, Bytes::from_static(b"accepted"));
    }

    #[tokio::test]
    async fn test_reqwest_transport_reports_connection_failure() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();
        let result = ReqwestTransport::default()
            .send(TransportRequest {
                url,
                init: RequestInit::new(Method::GET),
            })
            .await;

        assert!(matches!(result, Err(TransportError::Request(_))));
    }

    #[tokio::test]
    async fn test_reqwest_transport_reports_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let mut init = RequestInit::new(Method::GET);
        init.timeout = Some(Duration::from_millis(100));

        let url = Url::parse(&format!("{}/slow", mock_server.uri())).unwrap();
        let err = ReqwestTransport::with_timeout(Duration::from_secs(30))
            .unwrap()
            .send(TransportRequest { url, init })
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Timeout { duration_ms: 100 }));
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_transport_fn_receives_request() {
        let transport = transport_fn(|request: TransportRequest| async move {
            Ok(RawResponse {
                status: 200,
                status_text: None,
                headers: HeaderMap::new(),
                body: Bytes::from(request.url.to_string()),
            })
        });

        let url = Url::parse("https://api.example.com/echo").unwrap();
        let response = transport
            .send(TransportRequest {
                url,
                init: RequestInit::new(Method::GET),
            })
            .await
            .unwrap();

        assert_eq!(response.body, Bytes::from("https://api.example.com/echo"));
    }
}
