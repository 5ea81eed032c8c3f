//! Default request headers.
//!
//! Default headers are either a fixed map validated when the dispatcher is
//! built, or a [`HeaderProvider`] that is awaited afresh on every call.
//! Nothing is cached between calls; a provider that wants caching does it
//! itself.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::error::{BoxError, ConfigError, FetchError};
use crate::BoxFuture;

/// Plain name/value header mapping, as supplied by a [`HeaderProvider`].
pub type HeaderObject = BTreeMap<String, String>;

/// Supplies default headers asynchronously, once per call.
///
/// Implemented for any async closure returning a [`HeaderObject`].
///
/// ## Examples
///
/// ```rust
/// use openapi_fetch::{BoxError, HeaderObject, HeaderProvider};
///
/// let provider = || async {
///     let mut headers = HeaderObject::new();
///     headers.insert("Authorization".to_string(), "Bearer abc".to_string());
///     Ok::<_, BoxError>(headers)
/// };
///
/// fn assert_provider(_: &impl HeaderProvider) {}
/// assert_provider(&provider);
/// ```
pub trait HeaderProvider: Send + Sync {
    fn headers(&self) -> BoxFuture<'_, Result<HeaderObject, BoxError>>;
}

impl<F, Fut> HeaderProvider for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<HeaderObject, BoxError>> + Send + 'static,
{
    fn headers(&self) -> BoxFuture<'_, Result<HeaderObject, BoxError>> {
        Box::pin(self())
    }
}

/// Headers applied to every request before per-call headers.
#[derive(Clone, Default)]
pub enum DefaultHeaders {
    #[default]
    None,
    Static(HeaderMap),
    Provider(Arc<dyn HeaderProvider>),
}

impl fmt::Debug for DefaultHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Static(map) => f.debug_tuple("Static").field(map).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

impl DefaultHeaders {
    /// Resolves the headers for one call, awaiting the provider if any.
    pub async fn resolve(&self) -> Result<HeaderMap, FetchError> {
        match self {
            Self::None => Ok(HeaderMap::new()),
            Self::Static(map) => Ok(map.clone()),
            Self::Provider(provider) => {
                let object = provider
                    .headers()
                    .await
                    .map_err(FetchError::HeaderProvider)?;
                debug!(count = object.len(), "Resolved default headers from provider");
                Ok(header_map(&object)?)
            }
        }
    }
}

/// Parses a header name/value pair.
pub(crate) fn parse_header(
    name: &str,
    value: &str,
) -> Result<(HeaderName, HeaderValue), ConfigError> {
    let header_name =
        HeaderName::try_from(name).map_err(|e| ConfigError::invalid_header(name, e))?;
    let header_value =
        HeaderValue::try_from(value).map_err(|e| ConfigError::invalid_header(name, e))?;
    Ok((header_name, header_value))
}

/// Converts a plain mapping into a `HeaderMap`, later names replacing earlier ones.
pub(crate) fn header_map(object: &HeaderObject) -> Result<HeaderMap, ConfigError> {
    let mut map = HeaderMap::with_capacity(object.len());
    for (name, value) in object {
        let (name, value) = parse_header(name, value)?;
        map.insert(name, value);
    }
    Ok(map)
}
