//! Error types for `theagora-api-client`.

use reqwest::Method;
use thiserror::Error;
use url::Url;

/// Main error type for marketplace API access.
#[derive(Error, Debug)]
pub enum ApiClientError {
    /// Missing credential, unusable base URL or header value. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A request that cannot be built from the given arguments. Nothing was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The API answered with a non-2xx status. `body` is the raw response text.
    #[error("API {method} {path} failed ({status}): {body}")]
    Api {
        method: Method,
        path: String,
        status: u16,
        body: String,
    },

    /// The request never produced a response (connect, DNS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A 2xx response that could not be interpreted.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request payload serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiClientError {
    /// HTTP status of an [`ApiClientError::Api`] error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(sanitize_reqwest_error(&value))
    }
}

/// Result type alias for marketplace API operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;

#[must_use]
pub fn redact_url(url: &Url) -> String {
    let mut u = url.clone();
    let _ = u.set_username("");
    let _ = u.set_password(None);
    u.set_query(None);
    u.set_fragment(None);
    u.to_string()
}

#[must_use]
pub fn sanitize_reqwest_error(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    if let Some(u) = e.url() {
        msg = msg.replace(u.as_str(), &redact_url(u));
    }
    msg
}
