//! Calls rejected by a runtime route schema.

use thiserror::Error;

use crate::method::HttpMethod;
use crate::schema::{ParamLocation, ParamType};

/// A call that does not match the route schema attached to the dispatcher.
///
/// These are the runtime counterparts of the checks the typed [`Route`]
/// layer performs at compile time. They are only raised for untyped calls
/// made through a dispatcher configured with a [`RouteSchema`].
///
/// [`Route`]: crate::Route
/// [`RouteSchema`]: crate::RouteSchema
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaViolation {
    /// The path template is not a key of the schema.
    #[error("Unknown path: {path}")]
    UnknownPath { path: String },

    /// The path exists but does not declare this method.
    #[error("Method {method} is not declared for {path}")]
    MethodNotAllowed { path: String, method: HttpMethod },

    /// A required parameter was not supplied.
    #[error("Missing required {location} parameter: {name}")]
    MissingParameter {
        location: ParamLocation,
        name: String,
    },

    /// A parameter was supplied that the route does not declare.
    #[error("Undeclared {location} parameter: {name}")]
    UndeclaredParameter {
        location: ParamLocation,
        name: String,
    },

    /// A parameter value does not match its declared primitive type.
    #[error("{location} parameter {name} must be {expected}, got {actual}")]
    ParameterType {
        location: ParamLocation,
        name: String,
        expected: ParamType,
        actual: String,
    },

    /// A body was supplied for a route without a request body.
    #[error("Route does not accept a request body")]
    UnexpectedBody,

    /// The route requires a body and none was supplied.
    #[error("Route requires a request body")]
    MissingBody,

    /// The body content type is not one the route declares.
    #[error("Content type {content_type} is not declared (expected one of: {})", declared.join(", "))]
    UndeclaredContentType {
        content_type: String,
        declared: Vec<String>,
    },
}
