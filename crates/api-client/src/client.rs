//! The marketplace API client.
//!
//! All outbound communication goes through [`ApiClient::execute`]: URL construction, auth and
//! default headers, body encoding, status checks and error mapping live here and nowhere else.
//! Endpoint-specific methods (see `crate::endpoints`) only build a [`RequestDescriptor`].

use crate::config::SessionConfig;
use crate::error::{ApiClientError, Result};
use crate::identity::{AgentIdCache, agent_id_from_profile};
use crate::request::RequestDescriptor;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    config: SessionConfig,
    http: reqwest::Client,
    agent_id: AgentIdCache,
}

impl ApiClient {
    /// Build a client from a validated session config.
    ///
    /// The resulting instance is cheap to clone and safe to share across tasks; clones share the
    /// same agent-id cache.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Configuration`] if the underlying HTTP client cannot be built.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .default_headers(config.default_headers().clone())
            .user_agent(concat!("theagora-mcp/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            ApiClientError::Configuration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                config,
                http,
                agent_id: AgentIdCache::default(),
            }),
        })
    }

    /// Build a client from `THEAGORA_API_KEY` / `THEAGORA_API_URL` / `THEAGORA_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Configuration`] if the credential is missing or invalid.
    pub fn from_env() -> Result<Self> {
        Self::new(SessionConfig::from_env()?)
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Execute one API exchange and return the parsed JSON body.
    ///
    /// A 2xx response yields its JSON body as-is (`null` for an empty body). Anything else is an
    /// [`ApiClientError::Api`] carrying the method, path, status and the raw body text.
    ///
    /// # Errors
    ///
    /// - [`ApiClientError::Api`] for non-2xx responses
    /// - [`ApiClientError::Transport`] if no response was received
    /// - [`ApiClientError::Decode`] if a 2xx body is not JSON
    pub async fn execute(&self, request: RequestDescriptor) -> Result<Value> {
        let url = request.url(self.inner.config.base_url())?;
        let method = request.method().clone();
        let path = request.path().to_string();

        let mut builder = self.inner.http.request(method.clone(), url);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout() {
            builder = builder.timeout(timeout);
        }

        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "marketplace API call"
        );

        if !status.is_success() {
            return Err(ApiClientError::Api {
                method,
                path,
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            ApiClientError::Decode(format!("{method} {path} returned a non-JSON body: {e}"))
        })
    }

    /// The caller's own agent id, fetched from `/me` on first use and cached afterwards.
    ///
    /// # Errors
    ///
    /// Propagates the profile lookup error; the cache stays empty so a later call retries.
    pub async fn get_agent_id(&self) -> Result<String> {
        self.inner
            .agent_id
            .get_or_fetch(|| async {
                let profile = self.get_profile().await?;
                let id = agent_id_from_profile(&profile)?;
                debug!(agent_id = %id, "cached agent id");
                Ok(id)
            })
            .await
    }

    /// Peek at the cached agent id without touching the network.
    #[must_use]
    pub fn cached_agent_id(&self) -> Option<String> {
        self.inner.agent_id.get()
    }

    /// Forget the cached agent id (e.g. after the account behind the credential changed).
    pub fn invalidate_agent_id(&self) {
        self.inner.agent_id.clear();
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.inner.config)
            .field("cached_agent_id", &self.cached_agent_id())
            .finish()
    }
}
