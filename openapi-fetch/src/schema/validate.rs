//! Checking untyped calls against a route schema.

use serde_json::Value;

use super::{ParamLocation, RouteDefinition, RouteSchema};
use crate::error::SchemaViolation;
use crate::method::HttpMethod;
use crate::request::{CallOptions, ParamMap};

impl RouteSchema {
    /// Checks a call against the schema and returns the matched route.
    ///
    /// Path, query and header parameters are checked for presence, for
    /// being declared, and for their primitive type. A `null` value counts
    /// as absent. Header names match case-insensitively. Cookie parameters
    /// cannot be supplied through [`CallOptions`] and are not checked.
    ///
    /// ## Errors
    ///
    /// Returns the first [`SchemaViolation`] found.
    pub fn validate(
        &self,
        path: &str,
        method: HttpMethod,
        options: &CallOptions,
    ) -> Result<&RouteDefinition, SchemaViolation> {
        let methods = self
            .path_item(path)
            .ok_or_else(|| SchemaViolation::UnknownPath {
                path: path.to_string(),
            })?;

        let route = methods
            .get(&method)
            .ok_or_else(|| SchemaViolation::MethodNotAllowed {
                path: path.to_string(),
                method,
            })?;

        check_section(route, ParamLocation::Path, &options.path)?;
        check_section(route, ParamLocation::Query, &options.query)?;
        check_section(route, ParamLocation::Header, &options.header)?;
        check_body(route, options)?;

        Ok(route)
    }
}

fn names_match(location: ParamLocation, declared: &str, supplied: &str) -> bool {
    match location {
        ParamLocation::Header => declared.eq_ignore_ascii_case(supplied),
        _ => declared == supplied,
    }
}

fn check_section(
    route: &RouteDefinition,
    location: ParamLocation,
    supplied: &ParamMap,
) -> Result<(), SchemaViolation> {
    for spec in route.parameters_in(location) {
        let value = supplied
            .iter()
            .find(|(name, _)| names_match(location, &spec.name, name))
            .map(|(_, value)| value)
            .filter(|value| !value.is_null());

        match value {
            None if spec.required => {
                return Err(SchemaViolation::MissingParameter {
                    location,
                    name: spec.name.clone(),
                });
            }
            None => {}
            Some(value) if !spec.param_type.accepts(value) => {
                return Err(SchemaViolation::ParameterType {
                    location,
                    name: spec.name.clone(),
                    expected: spec.param_type,
                    actual: json_type_name(value).to_string(),
                });
            }
            Some(_) => {}
        }
    }

    for name in supplied.keys() {
        let declared = route
            .parameters_in(location)
            .any(|spec| names_match(location, &spec.name, name));
        if !declared {
            return Err(SchemaViolation::UndeclaredParameter {
                location,
                name: name.clone(),
            });
        }
    }

    Ok(())
}

fn check_body(route: &RouteDefinition, options: &CallOptions) -> Result<(), SchemaViolation> {
    let Some(spec) = &route.request_body else {
        if options.content_type.is_some() || options.data.is_some() {
            return Err(SchemaViolation::UnexpectedBody);
        }
        return Ok(());
    };

    match &options.content_type {
        None if spec.required => Err(SchemaViolation::MissingBody),
        None => Ok(()),
        Some(content_type) if !spec.content.contains(content_type) => {
            Err(SchemaViolation::UndeclaredContentType {
                content_type: content_type.clone(),
                declared: spec.content.clone(),
            })
        }
        Some(_) => Ok(()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
