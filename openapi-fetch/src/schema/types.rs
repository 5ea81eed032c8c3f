//! Route schema types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::ConfigError;
use crate::method::HttpMethod;

/// Where a parameter travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// Primitive type a parameter value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    /// No type constraint.
    #[default]
    Any,
}

impl ParamType {
    /// Returns `true` if `value` has this type.
    pub fn accepts(self, value: &serde_json::Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
            Self::Any => true,
        }
    }
}

/// A declared path, query, header or cookie parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    #[serde(default)]
    pub required: bool,
    #[serde(default, rename = "type")]
    pub param_type: ParamType,
}

impl ParameterSpec {
    /// A path parameter. Path parameters are always required.
    pub fn path(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            location: ParamLocation::Path,
            required: true,
            param_type,
        }
    }

    /// An optional query parameter.
    pub fn query(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            location: ParamLocation::Query,
            required: false,
            param_type,
        }
    }

    /// An optional header parameter.
    pub fn header(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            location: ParamLocation::Header,
            required: false,
            param_type,
        }
    }

    /// Marks the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Declared request body: the accepted content types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestBodySpec {
    #[serde(default)]
    pub required: bool,
    pub content: Vec<String>,
}

impl RequestBodySpec {
    /// A required body accepting the given content types.
    pub fn required<I, S>(content: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: true,
            content: content.into_iter().map(Into::into).collect(),
        }
    }

    /// An optional body accepting the given content types.
    pub fn optional<I, S>(content: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: false,
            ..Self::required(content)
        }
    }
}

/// Declared response for one status: content types and header names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseSpec {
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub headers: Vec<String>,
}

/// One method of one path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteDefinition {
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
    #[serde(default, rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodySpec>,
    /// Keyed by status code (`"200"`) or `"default"`.
    #[serde(default)]
    pub responses: BTreeMap<String, ResponseSpec>,
}

impl RouteDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    pub fn body(mut self, spec: RequestBodySpec) -> Self {
        self.request_body = Some(spec);
        self
    }

    pub fn response(mut self, status: u16, spec: ResponseSpec) -> Self {
        self.responses.insert(status.to_string(), spec);
        self
    }

    /// Declares the fallback response used for unlisted statuses.
    pub fn default_response(mut self, spec: ResponseSpec) -> Self {
        self.responses.insert("default".to_string(), spec);
        self
    }

    /// Declared parameters in one location.
    pub fn parameters_in(
        &self,
        location: ParamLocation,
    ) -> impl Iterator<Item = &ParameterSpec> + '_ {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }

    /// The response declared for `status`, falling back to `default`.
    pub fn response_for(&self, status: u16) -> Option<&ResponseSpec> {
        self.responses
            .get(&status.to_string())
            .or_else(|| self.responses.get("default"))
    }
}

/// Paths mapped to their declared methods.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteSchema {
    paths: BTreeMap<String, BTreeMap<HttpMethod, RouteDefinition>>,
}

impl RouteSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the definition of `method` on `path`.
    pub fn route(
        mut self,
        path: impl Into<String>,
        method: HttpMethod,
        definition: RouteDefinition,
    ) -> Self {
        self.paths
            .entry(path.into())
            .or_default()
            .insert(method, definition);
        self
    }

    /// Parses a schema from JSON.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(source).map_err(|e| ConfigError::InvalidSchema(e.to_string()))
    }

    /// Parses a schema from YAML.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(source).map_err(|e| ConfigError::InvalidSchema(e.to_string()))
    }

    /// Declared path templates.
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.paths.keys().map(String::as_str)
    }

    /// Methods declared for `path`.
    pub fn methods(&self, path: &str) -> impl Iterator<Item = HttpMethod> + '_ {
        self.paths
            .get(path)
            .into_iter()
            .flat_map(|methods| methods.keys().copied())
    }

    pub fn get(&self, path: &str, method: HttpMethod) -> Option<&RouteDefinition> {
        self.paths.get(path)?.get(&method)
    }

    pub(crate) fn path_item(&self, path: &str) -> Option<&BTreeMap<HttpMethod, RouteDefinition>> {
        self.paths.get(path)
    }
}
