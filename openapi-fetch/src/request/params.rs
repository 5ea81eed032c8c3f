//! Path, query and header assembly.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use super::ParamMap;
use crate::error::ConfigError;
use crate::headers::parse_header;

/// Returns `true` for values treated as "not provided" in a query string.
///
/// `null`, `false`, `0`, `0.0` and `""` are falsy. Arrays and objects,
/// even empty ones, are not. Numeric zero is therefore indistinguishable
/// from an absent parameter.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// String form of a parameter value.
///
/// Strings are used verbatim, numbers and booleans in their display form,
/// arrays are joined with `,` and objects are written as compact JSON.
pub fn param_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(param_string).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Replaces the first `{name}` placeholder for every supplied path parameter.
///
/// Placeholders without a matching parameter are left in place, and `null`
/// values are skipped. Values are not percent-encoded here; URL resolution
/// encodes what it must.
pub(crate) fn substitute_path(template: &str, params: &ParamMap) -> String {
    let mut path = template.to_string();
    for (key, value) in params {
        if value.is_null() {
            continue;
        }
        path = path.replacen(&format!("{{{key}}}"), &param_string(value), 1);
    }
    path
}

/// Resolves `path` relative to `base` as `./<path>`, so a base path prefix
/// such as `/api/v1/` is kept.
pub(crate) fn resolve_url(base: &Url, path: &str) -> Result<Url, ConfigError> {
    Ok(base.join(&format!(".{path}"))?)
}

/// Sets every non-falsy query parameter on `url`.
///
/// A key already in the URL's query string keeps its position and takes the
/// new value; further occurrences of it are removed.
pub(crate) fn append_query(url: &mut Url, query: &ParamMap) {
    let mut present = query.iter().filter(|(_, v)| !is_falsy(v)).peekable();
    if present.peek().is_none() {
        return;
    }

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    for (key, value) in present {
        let value = param_string(value);
        match pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                pairs[first].1 = value;
                let mut index = 0;
                pairs.retain(|(k, _)| {
                    let keep = k != key || index == first;
                    index += 1;
                    keep
                });
            }
            None => pairs.push((key.clone(), value)),
        }
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
}

/// Builds the final request headers.
///
/// Precedence, lowest to highest: default headers, then `Content-Type`
/// from the call's content type, then per-call headers. `null` per-call
/// values are skipped.
pub(crate) fn assemble_headers(
    defaults: HeaderMap,
    content_type: Option<&str>,
    per_call: &ParamMap,
) -> Result<HeaderMap, ConfigError> {
    let mut headers = defaults;

    if let Some(content_type) = content_type {
        let value = HeaderValue::try_from(content_type)
            .map_err(|e| ConfigError::invalid_header(CONTENT_TYPE.as_str(), e))?;
        headers.insert(CONTENT_TYPE, value);
    }

    for (name, value) in per_call {
        if value.is_null() {
            continue;
        }
        let (name, value) = parse_header(name, &param_string(value))?;
        headers.insert(name, value);
    }

    Ok(headers)
}
