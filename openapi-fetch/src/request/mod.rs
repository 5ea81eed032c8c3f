//! Per-call options and the request-building steps applied to them.
//!
//! Building runs in a fixed order: path substitution, URL resolution against
//! the base URL, query parameters, then header assembly. Values are not
//! checked against any schema here; that happens earlier, if at all.

mod options;
mod params;

pub use options::{CallOptions, FetchOptions, ParamMap, RequestOverrides};
pub use params::{is_falsy, param_string};

pub(crate) use params::{append_query, assemble_headers, resolve_url, substitute_path};
