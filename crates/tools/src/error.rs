//! Error types for `theagora-tools`.

use theagora_api_client::ApiClientError;
use thiserror::Error;

/// Failures that cannot be expressed as a tool result.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Failures inside a tool handler. All of them end up as an error result.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// A lookup that completed but found nothing. The message is shown as-is.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Client(#[from] ApiClientError),
}

impl ToolError {
    pub(crate) fn invalid_params(e: &serde_json::Error) -> Self {
        Self::InvalidParams(e.to_string())
    }
}
