//! Typed routes.
//!
//! A schema generator emits one zero-sized type per path and method and
//! implements [`Route`] for it. The associated types carry the shape of the
//! call, so the compiler rejects what a runtime check would otherwise have
//! to catch:
//!
//! - an undeclared path or method has no `Route` type to name;
//! - a missing required parameter is a missing struct field;
//! - an undeclared parameter is an unknown struct field;
//! - a mistyped parameter or body is a type error.
//!
//! ## Examples
//!
//! ```rust
//! use openapi_fetch::{ApiResponse, CodecError, FromApiResponse, HttpMethod, NoBody, Route};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! pub struct GetSitePath {
//!     pub site_id: String,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! pub struct Site {
//!     pub name: String,
//! }
//!
//! pub enum GetSiteResponse {
//!     Ok(Site),
//!     Unknown(ApiResponse),
//! }
//!
//! impl FromApiResponse for GetSiteResponse {
//!     fn from_api_response(response: ApiResponse) -> Result<Self, CodecError> {
//!         match response.status {
//!             200 => Ok(Self::Ok(response.json()?)),
//!             _ => Ok(Self::Unknown(response)),
//!         }
//!     }
//! }
//!
//! pub struct GetSite;
//!
//! impl Route for GetSite {
//!     const PATH: &'static str = "/site/{site_id}";
//!     const METHOD: HttpMethod = HttpMethod::Get;
//!     type Path = GetSitePath;
//!     type Query = ();
//!     type Header = ();
//!     type Body = NoBody;
//!     type Response = GetSiteResponse;
//! }
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::codec::APPLICATION_JSON;
use crate::error::CodecError;
use crate::method::HttpMethod;
use crate::request::{CallOptions, FetchOptions, ParamMap};
use crate::response::ApiResponse;

/// One method of one path in a route schema.
///
/// Parameter sections that a route does not have use `()`.
pub trait Route {
    /// Path template, e.g. `/pets/{petId}`.
    const PATH: &'static str;
    const METHOD: HttpMethod;

    type Path: Serialize;
    type Query: Serialize;
    type Header: Serialize;
    type Body: RequestBody;
    type Response: FromApiResponse;
}

/// A request body together with its declared content type.
pub trait RequestBody {
    /// Splits the body into content type and data.
    ///
    /// `(None, None)` means the request has no body.
    fn into_parts(self) -> Result<(Option<String>, Option<Value>), CodecError>;
}

/// The body of a route without a request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoBody;

impl RequestBody for NoBody {
    fn into_parts(self) -> Result<(Option<String>, Option<Value>), CodecError> {
        Ok((None, None))
    }
}

/// An `application/json` body.
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T>(pub T);

impl<T: Serialize> RequestBody for Json<T> {
    fn into_parts(self) -> Result<(Option<String>, Option<Value>), CodecError> {
        let data = serde_json::to_value(self.0).map_err(CodecError::JsonEncode)?;
        Ok((Some(APPLICATION_JSON.to_string()), Some(data)))
    }
}

/// A body sent under an explicit content type.
#[derive(Debug, Clone, PartialEq)]
pub struct Body<T> {
    pub content_type: &'static str,
    pub data: T,
}

impl<T: Serialize> RequestBody for Body<T> {
    fn into_parts(self) -> Result<(Option<String>, Option<Value>), CodecError> {
        let data = serde_json::to_value(self.data).map_err(CodecError::JsonEncode)?;
        Ok((Some(self.content_type.to_string()), Some(data)))
    }
}

/// Converts a decoded response into a route's typed response.
pub trait FromApiResponse: Sized {
    fn from_api_response(response: ApiResponse) -> Result<Self, CodecError>;
}

impl FromApiResponse for ApiResponse {
    fn from_api_response(response: ApiResponse) -> Result<Self, CodecError> {
        Ok(response)
    }
}

/// Arguments for one typed call of route `R`.
pub struct Request<R: Route> {
    pub path: R::Path,
    pub query: R::Query,
    pub header: R::Header,
    pub body: R::Body,
    pub fetch_options: Option<FetchOptions>,
}

impl<R: Route> Request<R> {
    pub fn new(path: R::Path, query: R::Query, header: R::Header, body: R::Body) -> Self {
        Self {
            path,
            query,
            header,
            body,
            fetch_options: None,
        }
    }

    pub fn fetch_options(mut self, fetch_options: FetchOptions) -> Self {
        self.fetch_options = Some(fetch_options);
        self
    }

    /// Lowers the typed arguments into untyped call options.
    pub fn into_call_options(self) -> Result<CallOptions, CodecError> {
        let (content_type, data) = self.body.into_parts()?;
        Ok(CallOptions {
            path: param_map("path", &self.path)?,
            query: param_map("query", &self.query)?,
            header: param_map("header", &self.header)?,
            content_type,
            data,
            fetch_options: self.fetch_options,
        })
    }
}

impl<R> Default for Request<R>
where
    R: Route,
    R::Path: Default,
    R::Query: Default,
    R::Header: Default,
    R::Body: Default,
{
    fn default() -> Self {
        Self::new(
            R::Path::default(),
            R::Query::default(),
            R::Header::default(),
            R::Body::default(),
        )
    }
}

/// Serializes a parameter section; `()` and `None` become an empty map.
fn param_map<T: Serialize>(section: &'static str, value: &T) -> Result<ParamMap, CodecError> {
    let value = serde_json::to_value(value).map_err(|e| CodecError::InvalidParameters {
        section,
        message: e.to_string(),
    })?;

    match value {
        Value::Null => Ok(ParamMap::new()),
        Value::Object(map) => Ok(map),
        other => Err(CodecError::InvalidParameters {
            section,
            message: format!("expected a struct or map, got {other}"),
        }),
    }
}
