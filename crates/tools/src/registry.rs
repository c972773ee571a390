//! Tool lookup and dispatch.

use crate::catalog::{self, ToolDef};
use crate::envelope;
use crate::error::{RegistryError, ToolError};
use crate::validation::validate_arguments;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;
use std::collections::HashMap;
use theagora_api_client::ApiClient;
use tracing::{info, warn};

pub struct ToolRegistry {
    client: ApiClient,
    tools: Vec<ToolDef>,
    by_name: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Register the full catalog against `client`.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let tools = catalog::all();
        let by_name = tools
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name, i))
            .collect();
        Self {
            client,
            tools,
            by_name,
        }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Tool definitions in catalog order.
    #[must_use]
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDef::to_tool).collect()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolDef> {
        self.by_name.get(name).map(|&i| &self.tools[i])
    }

    /// Execute a tool call.
    ///
    /// Invalid arguments, API failures and local lookups that find nothing all come back as an
    /// error result (`isError: true`), never as `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownTool`] if no tool is registered under `name`.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, RegistryError> {
        let tool = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownTool(name.to_string()))?;

        // A missing arguments object means "no arguments".
        let arguments = match arguments {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };

        info!(tool = %name, "tool call");
        if let Err(message) = validate_arguments(tool.name, &tool.input_schema, &arguments) {
            warn!(tool = %name, error = %message, "tool call rejected");
            return Ok(envelope::error(message));
        }

        match (tool.handler)(self.client.clone(), arguments).await {
            Ok(value) => Ok(envelope::success(&value)),
            Err(e) => {
                log_failure(name, &e);
                Ok(envelope::error(e.to_string()))
            }
        }
    }
}

fn log_failure(tool: &str, e: &ToolError) {
    let status = match e {
        ToolError::Client(client_err) => client_err.status(),
        ToolError::InvalidParams(_) | ToolError::NotFound(_) => None,
    };
    warn!(tool = %tool, status = ?status, error = %e, "tool call failed");
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("client", &self.client)
            .field("tools", &self.tools.len())
            .finish()
    }
}
