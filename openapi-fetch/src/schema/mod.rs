//! Runtime route schema.
//!
//! Typed calls through [`Route`](crate::Route) are checked by the compiler.
//! Untyped calls through [`Fetcher::fetch`](crate::Fetcher::fetch) can be
//! checked at runtime instead by attaching a [`RouteSchema`] to the
//! dispatcher: calls that do not fit are rejected with a
//! [`SchemaViolation`](crate::SchemaViolation) before anything is sent.
//!
//! A schema can be built in code or loaded from JSON or YAML:
//!
//! ```yaml
//! /pets/{petId}:
//!   get:
//!     parameters:
//!       - { name: petId, in: path, required: true, type: integer }
//!       - { name: verbose, in: query, type: boolean }
//!     responses:
//!       "200": { content: ["application/json; charset=utf-8"] }
//!       "404": {}
//! ```

mod types;
mod validate;

pub use types::{
    ParamLocation, ParamType, ParameterSpec, RequestBodySpec, ResponseSpec, RouteDefinition,
    RouteSchema,
};
