//! Per-call argument bag.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;

use crate::codec::APPLICATION_JSON;
use crate::transport::RequestInit;

/// Parameter values keyed by name.
pub type ParamMap = serde_json::Map<String, Value>;

/// Options for a single untyped dispatch call.
///
/// ## Examples
///
/// ```rust
/// use openapi_fetch::CallOptions;
/// use serde_json::json;
///
/// let options = CallOptions::new()
///     .path_param("petId", 42)
///     .query_param("verbose", true)
///     .header("X-Request-Id", "abc")
///     .json(json!({"name": "Rex"}));
///
/// assert_eq!(options.content_type.as_deref(), Some("application/json"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Values substituted into `{name}` placeholders.
    pub path: ParamMap,
    /// Search parameters. Falsy values are omitted.
    pub query: ParamMap,
    /// Per-call headers, applied last.
    pub header: ParamMap,
    /// Declared media type of `data`; also sent as `Content-Type`.
    pub content_type: Option<String>,
    pub data: Option<Value>,
    pub fetch_options: Option<FetchOptions>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.header.insert(name.into(), value.into());
        self
    }

    /// Sets the body and its content type.
    pub fn body(mut self, content_type: impl Into<String>, data: impl Into<Value>) -> Self {
        self.content_type = Some(content_type.into());
        self.data = Some(data.into());
        self
    }

    /// Sets an `application/json` body.
    pub fn json(self, data: impl Into<Value>) -> Self {
        self.body(APPLICATION_JSON, data)
    }

    pub fn fetch_options(mut self, fetch_options: FetchOptions) -> Self {
        self.fetch_options = Some(fetch_options);
        self
    }
}

/// Fields that replace the computed request options when set.
///
/// `body: Some(None)` removes the body.
#[derive(Debug, Clone, Default)]
pub struct RequestOverrides {
    pub method: Option<Method>,
    pub headers: Option<HeaderMap>,
    pub body: Option<Option<Bytes>>,
    pub timeout: Option<Duration>,
}

type ReplaceFn = dyn Fn(RequestInit) -> RequestInit + Send + Sync;

/// Caller control over the final request options.
#[derive(Clone)]
pub enum FetchOptions {
    /// Shallow-merged over the computed options; set fields win.
    Merge(RequestOverrides),
    /// Receives the computed options and returns the ones actually sent.
    Replace(Arc<ReplaceFn>),
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merge(overrides) => f.debug_tuple("Merge").field(overrides).finish(),
            Self::Replace(_) => f.write_str("Replace(..)"),
        }
    }
}

impl From<RequestOverrides> for FetchOptions {
    fn from(overrides: RequestOverrides) -> Self {
        Self::Merge(overrides)
    }
}

impl FetchOptions {
    /// Wraps a function that rewrites the computed request options.
    pub fn replace<F>(f: F) -> Self
    where
        F: Fn(RequestInit) -> RequestInit + Send + Sync + 'static,
    {
        Self::Replace(Arc::new(f))
    }

    /// Produces the final request options from the computed ones.
    pub fn apply(&self, base: RequestInit) -> RequestInit {
        match self {
            Self::Replace(f) => f(base),
            Self::Merge(overrides) => {
                let overrides = overrides.clone();
                RequestInit {
                    method: overrides.method.unwrap_or(base.method),
                    headers: overrides.headers.unwrap_or(base.headers),
                    body: overrides.body.unwrap_or(base.body),
                    timeout: overrides.timeout.or(base.timeout),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use serde_json::json;

    fn base() -> RequestInit {
        let mut init = RequestInit::new(Method::POST);
        init.headers.insert("x-base", HeaderValue::from_static("1"));
        init.body = Some(Bytes::from_static(b"{}"));
        init
    }

    #[test]
    fn test_builder_collects_sections() {
        let options = CallOptions::new()
            .path_param("id", 7)
            .query_param("q", "rust")
            .header("X-A", 1)
            .body("application/json; charset=utf-8", json!([1, 2]));

        assert_eq!(options.path["id"], json!(7));
        assert_eq!(options.query["q"], json!("rust"));
        assert_eq!(options.header["X-A"], json!(1));
        assert_eq!(
            options.content_type.as_deref(),
            Some("application/json; charset=utf-8")
        );
        assert_eq!(options.data, Some(json!([1, 2])));
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let overrides = RequestOverrides {
            timeout: Some(Duration::from_secs(3)),
            ..Default::default()
        };
        let init = FetchOptions::from(overrides).apply(base());

        assert_eq!(init.method, Method::POST);
        assert_eq!(init.headers.get("x-base").unwrap(), "1");
        assert_eq!(init.body, Some(Bytes::from_static(b"{}")));
        assert_eq!(init.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut headers = HeaderMap::new();
        headers.insert("x-other", HeaderValue::from_static("2"));
        let overrides = RequestOverrides {
            method: Some(Method::PUT),
            headers: Some(headers),
            body: Some(None),
            ..Default::default()
        };
        let init = FetchOptions::Merge(overrides).apply(base());

        assert_eq!(init.method, Method::PUT);
        assert!(init.headers.get("x-base").is_none());
        assert_eq!(init.headers.get("x-other").unwrap(), "2");
        assert!(init.body.is_none());
    }

    #[test]
    fn test_replace_receives_base() {
        let options = FetchOptions::replace(|mut init: RequestInit| {
            assert_eq!(init.method, Method::POST);
            init.headers.insert("x-added", HeaderValue::from_static("yes"));
            init.method = Method::PATCH;
            init
        });
        let init = options.apply(base());

        assert_eq!(init.method, Method::PATCH);
        assert_eq!(init.headers.get("x-base").unwrap(), "1");
        assert_eq!(init.headers.get("x-added").unwrap(), "yes");
        assert_eq!(format!("{options:?}"), "Replace(..)");
    }
}
