//! The request dispatcher factory.
//!
//! [`create_fetch`] turns a [`FetchConfig`] into a [`Fetcher`]: a reusable,
//! stateless dispatcher whose calls build the request, send it through the
//! configured transport, report non-2xx statuses to the `on_error` hook and
//! decode the response.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use openapi_fetch::{create_fetch, CallOptions, FetchConfig, HttpMethod};
//!
//! let fetcher = create_fetch(
//!     FetchConfig::builder()
//!         .base_url("https://api.example.com/v1/")?
//!         .on_error(|err| eprintln!("API error {}: {}", err.status, err.message))
//!         .build()?,
//! );
//!
//! let response = fetcher
//!     .fetch("/items", HttpMethod::Get, CallOptions::new().query_param("limit", 10))
//!     .await?;
//! ```

mod config;
mod fetcher;

pub use config::{ErrorHook, FetchConfig, FetchConfigBuilder, BASE_URL_ENV};
pub use fetcher::{create_fetch, Fetcher};
