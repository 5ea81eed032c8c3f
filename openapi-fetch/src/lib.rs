//! Typed request dispatcher for OpenAPI-described HTTP APIs.
//!
//! [`create_fetch`] turns a [`FetchConfig`] into a reusable [`Fetcher`]. Each
//! call substitutes path parameters, resolves the path against the base URL,
//! appends non-falsy query parameters, merges headers, encodes the body,
//! sends the request and decodes the response by its content type.
//!
//! ## Features
//!
//! - **Typed routes**: generated [`Route`] types make undeclared paths,
//!   missing parameters and mistyped bodies compile errors
//! - **Runtime schema**: untyped calls can be checked against a
//!   [`RouteSchema`] and rejected with a [`SchemaViolation`]
//! - **Non-throwing HTTP errors**: non-2xx responses reach the `on_error`
//!   hook and are still returned as ordinary [`ApiResponse`] values
//! - **Pluggable capabilities**: [`Transport`], [`BodyEncoder`],
//!   [`ResponseDecoder`] and [`HeaderProvider`] can all be replaced
//! - **Layered error handling**: structured errors for each failure mode
//!
//! ## Example
//!
//! ```rust,ignore
//! use openapi_fetch::{create_fetch, CallOptions, FetchConfig, HttpMethod};
//!
//! let fetcher = create_fetch(
//!     FetchConfig::builder()
//!         .base_url("https://api.example.com/v1/")?
//!         .default_header("X-Client", "example")?
//!         .build()?,
//! );
//!
//! let response = fetcher
//!     .fetch(
//!         "/pets/{petId}",
//!         HttpMethod::Get,
//!         CallOptions::new().path_param("petId", 7),
//!     )
//!     .await?;
//! ```

pub mod client;
pub mod codec;
pub mod error;
pub mod headers;
pub mod method;
pub mod request;
pub mod response;
pub mod route;
pub mod schema;
pub mod transport;

/// A boxed future, used by the capability traits.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

// Re-exports for convenience
pub use client::{create_fetch, ErrorHook, FetchConfig, FetchConfigBuilder, Fetcher, BASE_URL_ENV};
pub use codec::{
    BodyEncoder, DefaultCodec, ResponseDecoder, APPLICATION_JSON, APPLICATION_JSON_UTF8,
    TEXT_PLAIN_UTF8,
};
pub use error::{
    ApiError, BoxError, CodecDirection, CodecError, ConfigError, FetchError, SchemaViolation,
    TransportError,
};
pub use headers::{DefaultHeaders, HeaderObject, HeaderProvider};
pub use method::HttpMethod;
pub use request::{is_falsy, param_string, CallOptions, FetchOptions, ParamMap, RequestOverrides};
pub use response::{ApiResponse, ResponseContent, ResponseData};
pub use route::{Body, FromApiResponse, Json, NoBody, Request, RequestBody, Route};
pub use schema::{
    ParamLocation, ParamType, ParameterSpec, RequestBodySpec, ResponseSpec, RouteDefinition,
    RouteSchema,
};
pub use transport::{
    transport_fn, RawResponse, RequestInit, ReqwestTransport, Transport, TransportFn,
    TransportRequest,
};
