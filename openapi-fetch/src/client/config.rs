//! Dispatcher configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::codec::{BodyEncoder, DefaultCodec, ResponseDecoder};
use crate::error::{ApiError, ConfigError, FetchError};
use crate::headers::{parse_header, DefaultHeaders, HeaderProvider};
use crate::schema::RouteSchema;
use crate::transport::{ReqwestTransport, Transport};

/// Environment variable read when no base URL is configured.
pub const BASE_URL_ENV: &str = "OPENAPI_FETCH_BASE_URL";

/// Default request timeout in seconds for the built-in transport.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Observer invoked with every non-2xx response.
pub type ErrorHook = Arc<dyn Fn(&ApiError) + Send + Sync>;

/// Immutable dispatcher configuration.
///
/// Built once with [`FetchConfig::builder`] and shared by every call of the
/// [`Fetcher`](crate::Fetcher) created from it.
#[derive(Clone)]
pub struct FetchConfig {
    pub(crate) base_url: Url,
    pub(crate) headers: DefaultHeaders,
    pub(crate) on_error: Option<ErrorHook>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) encoder: Arc<dyn BodyEncoder>,
    pub(crate) decoder: Arc<dyn ResponseDecoder>,
    pub(crate) schema: Option<Arc<RouteSchema>>,
}

impl fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchConfig")
            .field("base_url", &self.base_url.as_str())
            .field("headers", &self.headers)
            .field("on_error", &self.on_error.is_some())
            .field("schema", &self.schema.is_some())
            .finish_non_exhaustive()
    }
}

impl FetchConfig {
    /// Creates a new builder with default settings.
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::new()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn schema(&self) -> Option<&RouteSchema> {
        self.schema.as_deref()
    }
}

/// Builder for [`FetchConfig`].
///
/// ## Examples
///
/// ```rust,ignore
/// use std::time::Duration;
/// use openapi_fetch::{create_fetch, FetchConfig};
///
/// let config = FetchConfig::builder()
///     .base_url("https://api.example.com/v1/")?
///     .default_header("X-Client", "docs")?
///     .timeout(Duration::from_secs(10))
///     .on_error(|err| eprintln!("HTTP {}: {}", err.status, err.message))
///     .build()?;
///
/// let fetcher = create_fetch(config);
/// ```
pub struct FetchConfigBuilder {
    base_url: Option<Url>,
    timeout: Duration,
    headers: DefaultHeaders,
    on_error: Option<ErrorHook>,
    transport: Option<Arc<dyn Transport>>,
    encoder: Arc<dyn BodyEncoder>,
    decoder: Arc<dyn ResponseDecoder>,
    schema: Option<Arc<RouteSchema>>,
}

impl fmt::Debug for FetchConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchConfigBuilder")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("timeout", &self.timeout)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl Default for FetchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchConfigBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            headers: DefaultHeaders::None,
            on_error: None,
            transport: None,
            encoder: Arc::new(DefaultCodec),
            decoder: Arc::new(DefaultCodec),
            schema: None,
        }
    }

    /// Sets the URL every path is resolved against.
    ///
    /// Keep a trailing slash on a base URL with a path prefix
    /// (`https://host/api/`), otherwise its last segment is replaced.
    ///
    /// ## Errors
    ///
    /// Returns an error if `url` is not an absolute URL.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, FetchError> {
        self.base_url = Some(Url::parse(url.as_ref()).map_err(ConfigError::from)?);
        Ok(self)
    }

    /// Sets the timeout of the built-in transport.
    ///
    /// Has no effect when a custom transport is configured.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a static default header.
    ///
    /// Replaces a previously configured header provider.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, FetchError> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        let mut map = match std::mem::take(&mut self.headers) {
            DefaultHeaders::Static(map) => map,
            DefaultHeaders::None | DefaultHeaders::Provider(_) => Default::default(),
        };
        map.insert(name, value);
        self.headers = DefaultHeaders::Static(map);
        Ok(self)
    }

    /// Resolves default headers through `provider` on every call.
    ///
    /// Replaces any static default headers.
    pub fn header_provider(mut self, provider: impl HeaderProvider + 'static) -> Self {
        self.headers = DefaultHeaders::Provider(Arc::new(provider));
        self
    }

    /// Observes every non-2xx response. The call still returns the response.
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ApiError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Replaces the built-in `reqwest` transport.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Replaces the built-in body encoder.
    pub fn encoder(mut self, encoder: impl BodyEncoder + 'static) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    /// Replaces the built-in response decoder.
    pub fn decoder(mut self, decoder: impl ResponseDecoder + 'static) -> Self {
        self.decoder = Arc::new(decoder);
        self
    }

    /// Validates untyped calls against `schema` before sending them.
    pub fn schema(mut self, schema: RouteSchema) -> Self {
        self.schema = Some(Arc::new(schema));
        self
    }

    /// Builds the configuration.
    ///
    /// Without an explicit base URL, [`BASE_URL_ENV`] is read.
    ///
    /// ## Errors
    ///
    /// Returns an error if no base URL is available, or if the built-in
    /// transport cannot be constructed.
    pub fn build(self) -> Result<FetchConfig, FetchError> {
        let base_url = resolve_base_url(self.base_url, std::env::var(BASE_URL_ENV).ok())?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_timeout(self.timeout)?),
        };

        Ok(FetchConfig {
            base_url,
            headers: self.headers,
            on_error: self.on_error,
            transport,
            encoder: self.encoder,
            decoder: self.decoder,
            schema: self.schema,
        })
    }
}

/// Picks the explicit base URL, else the environment value.
fn resolve_base_url(explicit: Option<Url>, env_value: Option<String>) -> Result<Url, ConfigError> {
    if let Some(url) = explicit {
        return Ok(url);
    }

    match env_value.filter(|v| !v.trim().is_empty()) {
        Some(value) => Ok(Url::parse(value.trim())?),
        None => Err(ConfigError::missing_field("base_url")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::HeaderObject;
    use crate::BoxError;

    #[test]
    fn test_explicit_base_url_wins() {
        let explicit = Url::parse("https://explicit.example.com").unwrap();
        let url = resolve_base_url(
            Some(explicit.clone()),
            Some("https://env.example.com".to_string()),
        )
        .unwrap();
        assert_eq!(url, explicit);
    }

    #[test]
    fn test_env_base_url_fallback() {
        let url = resolve_base_url(None, Some(" https://env.example.com/api/ ".to_string())).unwrap();
        assert_eq!(url.as_str(), "https://env.example.com/api/");
    }

    #[test]
    fn test_missing_base_url() {
        let err = resolve_base_url(None, Some("  ".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "base_url" }));
    }

    #[test]
    fn test_invalid_env_base_url() {
        let err = resolve_base_url(None, Some("not a url".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = FetchConfig::builder().base_url("/relative").unwrap_err();
        assert!(matches!(err, FetchError::Config(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_build_with_defaults() {
        let config = FetchConfig::builder()
            .base_url("http://localhost:3000")
            .unwrap()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_str(), "http://localhost:3000/");
        assert!(matches!(config.headers, DefaultHeaders::None));
        assert!(config.on_error.is_none());
        assert!(config.schema().is_none());
    }

    #[test]
    fn test_default_headers_accumulate() {
        let config = FetchConfig::builder()
            .base_url("http://localhost")
            .unwrap()
            .default_header("X-One", "1")
            .unwrap()
            .default_header("X-Two", "2")
            .unwrap()
            .build()
            .unwrap();

        let DefaultHeaders::Static(map) = &config.headers else {
            panic!("expected static headers");
        };
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("x-one").unwrap(), "1");
    }

    #[test]
    fn test_invalid_default_header() {
        let err = FetchConfig::builder()
            .default_header("X-Bad", "line\nbreak")
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Config(ConfigError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_provider_replaces_static_headers() {
        let config = FetchConfig::builder()
            .base_url("http://localhost")
            .unwrap()
            .default_header("X-One", "1")
            .unwrap()
            .header_provider(|| async { Ok::<_, BoxError>(HeaderObject::new()) })
            .build()
            .unwrap();

        assert!(matches!(config.headers, DefaultHeaders::Provider(_)));
    }
}
