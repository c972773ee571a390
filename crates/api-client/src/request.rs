//! Request descriptors and URL/query construction.
//!
//! A [`RequestDescriptor`] is the per-call description of one API exchange: method, path
//! (relative to `/v1`), optional JSON body and flat query parameters. Query values that are
//! absent or empty strings are never serialized.

use crate::config::API_VERSION_PREFIX;
use crate::error::{ApiClientError, Result};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    body: Option<Value>,
    query: Vec<(String, Value)>,
    timeout: Option<Duration>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            path = format!("/{path}");
        }
        Self {
            method,
            path,
            body: None,
            query: Vec::new(),
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized to JSON.
    pub fn with_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Add every field of a flat, serializable record as a query parameter.
    ///
    /// `None` fields serialize to `null` and are dropped when the query string is built.
    ///
    /// # Errors
    ///
    /// Returns an error if `query` does not serialize to a JSON object.
    pub fn with_query<T: Serialize + ?Sized>(mut self, query: &T) -> Result<Self> {
        match serde_json::to_value(query)? {
            Value::Object(map) => {
                for (key, value) in map {
                    self = self.with_query_param(key, value);
                }
                Ok(self)
            }
            Value::Null => Ok(self),
            other => Err(ApiClientError::InvalidRequest(format!(
                "query parameters must be a flat object, got {other}"
            ))),
        }
    }

    /// Set one query parameter, replacing an earlier value under the same key.
    #[must_use]
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.query.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.query.push((key, value));
        }
        self
    }

    /// Per-request timeout overriding the client-wide one.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The body that will actually be sent: present, and only for methods that carry one.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body
            .as_ref()
            .filter(|_| method_accepts_body(&self.method))
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Encoded query string without the leading `?`, or `None` if nothing survives filtering.
    #[must_use]
    pub fn query_string(&self) -> Option<String> {
        let mut query = String::new();
        for (key, value) in &self.query {
            let Some(value) = query_value_to_string(value) else {
                continue;
            };
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&encode_component(key));
            query.push('=');
            query.push_str(&encode_component(&value));
        }
        (!query.is_empty()).then_some(query)
    }

    /// Absolute URL: `base_url` + `/v1` + path + query.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL does not parse.
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let raw = format!(
            "{}{API_VERSION_PREFIX}{}",
            base_url.trim_end_matches('/'),
            self.path
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| ApiClientError::Configuration(format!("Invalid URL '{raw}': {e}")))?;
        if let Some(query) = self.query_string() {
            url.set_query(Some(&query));
        }
        Ok(url)
    }
}

fn method_accepts_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

/// `None` means "omit": absent values and empty strings never reach the wire.
fn query_value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Integral floats render without a fractional part (`100.0` → `100`).
fn number_to_string(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Percent-encode an identifier for use as a single path segment.
///
/// # Errors
///
/// Returns [`ApiClientError::InvalidRequest`] for an empty id, `.` or `..`: URL normalization
/// would drop or resolve those, so the request would hit a different endpoint.
pub fn path_segment(s: &str) -> Result<String> {
    if matches!(s, "" | "." | "..") {
        return Err(ApiClientError::InvalidRequest(format!(
            "'{s}' is not a valid identifier"
        )));
    }
    Ok(encode_component(s))
}

fn encode_component(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0F) as usize] as char);
        }
    }
    out
}

fn is_unreserved(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Filters {
        q: Option<String>,
        min_price: Option<u64>,
        provider: Option<String>,
    }

    #[test]
    fn absent_and_empty_query_values_are_omitted() {
        let req = RequestDescriptor::get("/functions")
            .with_query(&Filters {
                q: Some(String::new()),
                min_price: Some(100),
                provider: None,
            })
            .expect("query");
        assert_eq!(req.query_string().as_deref(), Some("minPrice=100"));

        let req = RequestDescriptor::get("/functions")
            .with_query(&Filters {
                q: None,
                min_price: None,
                provider: Some(String::new()),
            })
            .expect("query");
        assert_eq!(req.query_string(), None);
        let url = req.url("https://api.example.com").expect("url");
        assert_eq!(url.as_str(), "https://api.example.com/v1/functions");
    }

    #[test]
    fn query_values_are_percent_encoded_once() {
        let req = RequestDescriptor::get("/functions")
            .with_query_param("q", "code review & more")
            .with_query_param("q", "a+b=c/d");
        assert_eq!(req.query_string().as_deref(), Some("q=a%2Bb%3Dc%2Fd"));
    }

    #[test]
    fn url_joins_base_version_and_path() {
        let req = RequestDescriptor::get("me");
        assert_eq!(req.path(), "/me");
        let url = req.url("http://localhost:3000/").expect("url");
        assert_eq!(url.as_str(), "http://localhost:3000/v1/me");
    }

    #[test]
    fn body_is_only_sent_for_methods_that_carry_one() {
        let body = json!({"amountCents": 500});
        let post = RequestDescriptor::post("/x").with_body(&body).expect("body");
        assert_eq!(post.body(), Some(&body));

        let get = RequestDescriptor::get("/x").with_body(&body).expect("body");
        assert_eq!(get.body(), None);

        let delete = RequestDescriptor::delete("/x").with_body(&body).expect("body");
        assert_eq!(delete.body(), None);

        let bare_post = RequestDescriptor::post("/invites/t/accept");
        assert_eq!(bare_post.body(), None);
    }

    #[test]
    fn scalar_kinds_serialize_plainly() {
        let req = RequestDescriptor::get("/orders")
            .with_query_param("limit", 50)
            .with_query_param("dryRun", false)
            .with_query_param("minReputation", 0.8)
            .with_query_param("minPrice", 100.0);
        assert_eq!(
            req.query_string().as_deref(),
            Some("limit=50&dryRun=false&minReputation=0.8&minPrice=100")
        );
    }

    #[test]
    fn non_object_query_is_rejected() {
        let err = RequestDescriptor::get("/x")
            .with_query(&json!(["a"]))
            .expect_err("array query");
        assert!(matches!(err, ApiClientError::InvalidRequest(_)));
    }

    #[test]
    fn path_segment_escapes_separators() {
        assert_eq!(path_segment("fn/../admin").expect("segment"), "fn%2F..%2Fadmin");
        assert_eq!(path_segment("agent_01-x.y~z").expect("segment"), "agent_01-x.y~z");
        assert_eq!(path_segment("...").expect("segment"), "...");
    }

    #[test]
    fn path_segment_rejects_ids_that_normalize_away() {
        for id in ["", ".", ".."] {
            let err = path_segment(id).expect_err("dot segment");
            assert!(matches!(err, ApiClientError::InvalidRequest(_)), "{id:?}");
        }
    }
}
