//! Decoded response values.
//!
//! [`ApiResponse`] is what every dispatch call resolves to, whatever the
//! status. Typed routes convert it further through
//! [`FromApiResponse`](crate::FromApiResponse).

mod value;

pub use value::{ApiResponse, ResponseContent, ResponseData};
