//! HTTP client for the Theagora marketplace API.
//!
//! [`ApiClient`] owns the single outbound session (base URL, bearer credential, default headers),
//! builds one request per endpoint method, and maps every non-2xx response to
//! [`ApiClientError::Api`] with the body preserved verbatim. The caller's own agent id is fetched
//! lazily from `/me` and cached for the lifetime of the client.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod numbers;
mod identity;
pub mod request;

pub use client::ApiClient;
pub use config::SessionConfig;
pub use endpoints::*;
pub use error::{ApiClientError, Result};
pub use request::RequestDescriptor;
