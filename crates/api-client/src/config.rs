//! Session configuration: base URL, credential, default headers.
//!
//! Built once per process and immutable afterwards. Construction is where a missing credential
//! surfaces, so a misconfigured process fails before it ever touches the network.

use crate::error::{ApiClientError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.theagoralabs.ai";

pub const API_KEY_ENV: &str = "THEAGORA_API_KEY";
pub const API_URL_ENV: &str = "THEAGORA_API_URL";
pub const TIMEOUT_ENV: &str = "THEAGORA_TIMEOUT_SECS";

/// Version segment inserted between the base URL and every endpoint path.
pub const API_VERSION_PREFIX: &str = "/v1";

pub const SOURCE_HEADER: &str = "x-theagora-source";
pub const SOURCE_HEADER_VALUE: &str = "mcp";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct SessionConfig {
    base_url: String,
    api_key: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl SessionConfig {
    /// Build a session config from an optional credential and base URL override.
    ///
    /// A missing or blank base URL falls back to [`DEFAULT_API_URL`]; a trailing `/` is stripped.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Configuration`] if the credential is missing or blank, if the
    /// base URL is not an absolute `http(s)` URL, or if the credential cannot be sent as an HTTP
    /// header value.
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Result<Self> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ApiClientError::Configuration(format!(
                    "{API_KEY_ENV} environment variable is required"
                ))
            })?;

        let base_url = base_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();

        let parsed = Url::parse(&base_url).map_err(|e| {
            ApiClientError::Configuration(format!("Invalid API base URL '{base_url}': {e}"))
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ApiClientError::Configuration(format!(
                "Invalid API base URL '{base_url}': unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let headers = default_headers(&api_key)?;

        Ok(Self {
            base_url,
            api_key,
            headers,
            timeout: Some(DEFAULT_TIMEOUT),
        })
    }

    /// Read the config from the process environment.
    ///
    /// # Errors
    ///
    /// See [`SessionConfig::from_lookup`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the config through an arbitrary key lookup (env-like).
    ///
    /// `THEAGORA_TIMEOUT_SECS=0` disables the client-wide timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Configuration`] on a missing credential, an invalid base URL, or
    /// a timeout that is not a whole number of seconds.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self::new(lookup(API_KEY_ENV), lookup(API_URL_ENV))?;
        match lookup(TIMEOUT_ENV).map(|v| v.trim().to_string()) {
            None => Ok(config),
            Some(raw) if raw.is_empty() => Ok(config),
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ApiClientError::Configuration(format!(
                        "{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"
                    ))
                })?;
                Ok(config.with_timeout_secs(secs))
            }
        }
    }

    /// Override the client-wide request timeout. `0` disables it.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers attached to every request (auth, content type, client source).
    #[must_use]
    pub fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact_key(&self.api_key))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn default_headers(api_key: &str) -> Result<HeaderMap> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
        ApiClientError::Configuration(format!(
            "{API_KEY_ENV} contains characters that are not valid in an HTTP header"
        ))
    })?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static(SOURCE_HEADER),
        HeaderValue::from_static(SOURCE_HEADER_VALUE),
    );
    Ok(headers)
}

fn redact_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{prefix}***")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn missing_credential_is_a_configuration_error() {
        let err = SessionConfig::from_lookup(lookup_from(&[])).expect_err("no key");
        assert!(matches!(err, ApiClientError::Configuration(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn blank_credential_is_a_configuration_error() {
        let err = SessionConfig::new(Some("   ".to_string()), None).expect_err("blank key");
        assert!(matches!(err, ApiClientError::Configuration(_)));
    }

    #[test]
    fn base_url_defaults_and_strips_trailing_slash() {
        let cfg = SessionConfig::new(Some("k".to_string()), None).expect("config");
        assert_eq!(cfg.base_url(), DEFAULT_API_URL);

        let cfg = SessionConfig::new(
            Some("k".to_string()),
            Some("http://localhost:8080/".to_string()),
        )
        .expect("config");
        assert_eq!(cfg.base_url(), "http://localhost:8080");

        let cfg = SessionConfig::new(Some("k".to_string()), Some(String::new())).expect("config");
        assert_eq!(cfg.base_url(), DEFAULT_API_URL);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = SessionConfig::new(Some("k".to_string()), Some("ftp://x".to_string()))
            .expect_err("ftp");
        assert!(matches!(err, ApiClientError::Configuration(_)));

        let err = SessionConfig::new(Some("k".to_string()), Some("not a url".to_string()))
            .expect_err("garbage");
        assert!(matches!(err, ApiClientError::Configuration(_)));
    }

    #[test]
    fn default_headers_carry_auth_content_type_and_source() {
        let cfg = SessionConfig::new(Some("sk_test".to_string()), None).expect("config");
        let h = cfg.default_headers();
        assert_eq!(
            h.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer sk_test")
        );
        assert_eq!(
            h.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(
            h.get(SOURCE_HEADER).and_then(|v| v.to_str().ok()),
            Some("mcp")
        );
    }

    #[test]
    fn timeout_from_lookup() {
        let cfg = SessionConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "k")])).expect("config");
        assert_eq!(cfg.timeout(), Some(DEFAULT_TIMEOUT));

        let cfg = SessionConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "k"), (TIMEOUT_ENV, "5")]))
            .expect("config");
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(5)));

        let cfg = SessionConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "k"), (TIMEOUT_ENV, "0")]))
            .expect("config");
        assert_eq!(cfg.timeout(), None);

        let err =
            SessionConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "k"), (TIMEOUT_ENV, "soon")]))
                .expect_err("bad timeout");
        assert!(matches!(err, ApiClientError::Configuration(_)));
    }

    #[test]
    fn debug_does_not_leak_credential() {
        let cfg = SessionConfig::new(Some("sk_live_very_secret".to_string()), None).expect("config");
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("very_secret"));
    }
}
