//! Uniform tool results.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

/// Successful result: the value pretty-printed as JSON text.
#[must_use]
pub fn success(value: &Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    CallToolResult::success(vec![Content::text(text)])
}

/// Error result (`isError: true`) carrying a human-readable message.
#[must_use]
pub fn error(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}
