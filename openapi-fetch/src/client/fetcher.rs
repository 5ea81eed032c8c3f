//! Request dispatch with tracing instrumentation.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, instrument, warn, Span};
use url::Url;

use super::config::FetchConfig;
use crate::error::{ApiError, FetchError};
use crate::method::HttpMethod;
use crate::request::{append_query, assemble_headers, resolve_url, substitute_path, CallOptions};
use crate::response::ApiResponse;
use crate::route::{FromApiResponse, Request, Route};
use crate::transport::{RequestInit, TransportRequest};

/// Creates a dispatcher from `config`.
///
/// The returned [`Fetcher`] is cheap to clone and safe to share between
/// tasks; every call is independent and nothing is mutated after creation.
pub fn create_fetch(config: FetchConfig) -> Fetcher {
    Fetcher::new(config)
}

/// The dispatch function produced by [`create_fetch`].
///
/// ## Examples
///
/// ```rust,ignore
/// use openapi_fetch::{create_fetch, CallOptions, FetchConfig, HttpMethod};
///
/// let fetcher = create_fetch(
///     FetchConfig::builder()
///         .base_url("http://localhost:3000")?
///         .build()?,
/// );
///
/// let response = fetcher
///     .fetch(
///         "/site/{site_id}",
///         HttpMethod::Get,
///         CallOptions::new().path_param("site_id", "123"),
///     )
///     .await?;
/// println!("{:?}", response.data());
/// ```
#[derive(Debug, Clone)]
pub struct Fetcher {
    config: Arc<FetchConfig>,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Issues a typed call for route `R`.
    ///
    /// The route type fixes the path and method; `request` carries the
    /// parameters and body in the route's own types.
    ///
    /// ## Errors
    ///
    /// Same as [`fetch`](Self::fetch), plus a [`CodecError`] when the
    /// response does not convert into `R::Response`.
    ///
    /// [`CodecError`]: crate::CodecError
    pub async fn call<R: Route>(&self, request: Request<R>) -> Result<R::Response, FetchError> {
        let options = request.into_call_options()?;
        let response = self.fetch(R::PATH, R::METHOD, options).await?;
        Ok(R::Response::from_api_response(response)?)
    }

    /// Issues an untyped call.
    ///
    /// Builds the URL from `path` and the call's path and query parameters,
    /// assembles headers (defaults, then `Content-Type`, then per-call),
    /// encodes the body, applies `fetch_options` and sends the request. A
    /// non-2xx status is passed to the `on_error` hook and then decoded like
    /// any other response.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - an attached route schema rejects the call
    /// - the default header provider fails, or a header is invalid
    /// - the request or response content type is unsupported
    /// - the transport fails before a response is received
    #[instrument(
        name = "fetch_request",
        skip(self, options),
        fields(
            http.method = %method,
            http.route = path,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn fetch(
        &self,
        path: &str,
        method: HttpMethod,
        options: CallOptions,
    ) -> Result<ApiResponse, FetchError> {
        let config = &self.config;

        if let Some(schema) = &config.schema {
            if let Err(violation) = schema.validate(path, method, &options) {
                warn!(%violation, "Call rejected by route schema");
                return Err(violation.into());
            }
        }

        let CallOptions {
            path: path_params,
            query,
            header,
            content_type,
            data,
            fetch_options,
        } = options;

        let substituted = substitute_path(path, &path_params);
        let mut url = resolve_url(&config.base_url, &substituted)?;
        append_query(&mut url, &query);

        let defaults = config.headers.resolve().await?;
        let headers = assemble_headers(defaults, content_type.as_deref(), &header)?;
        let body = config
            .encoder
            .encode(data.as_ref(), content_type.as_deref())?;

        let base = RequestInit {
            method: method.to_reqwest(),
            headers,
            body,
            timeout: None,
        };
        let init = match &fetch_options {
            Some(fetch_options) => fetch_options.apply(base),
            None => base,
        };

        Span::current().record("http.url", url.as_str());
        debug!(method = %init.method, has_body = init.body.is_some(), "Sending request");

        let response = match config.transport.send(TransportRequest { url, init }).await {
            Ok(response) => response,
            Err(e) => {
                Span::current().record("otel.status_code", "ERROR");
                warn!(error = %e, "Transport failed");
                return Err(e.into());
            }
        };

        let status = response.status;
        Span::current().record("http.status_code", status);

        if response.is_success() {
            Span::current().record("otel.status_code", "OK");
        } else {
            let otel_status = if status >= 500 { "ERROR" } else { "UNSET" };
            Span::current().record("otel.status_code", otel_status);

            let error = ApiError::from_response(&response, None);
            warn!(status, reason = %error.message, "Non-success response");
            if let Some(on_error) = &config.on_error {
                on_error(&error);
            }
        }

        let content_type = response.content_type().map(Cow::into_owned);
        Ok(config.decoder.decode(response, content_type).await?)
    }
}
