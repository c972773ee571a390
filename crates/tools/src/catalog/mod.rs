//! The fixed tool catalog, grouped by marketplace area.

mod analytics;
mod buying;
mod discovery;
mod exchange;
mod identity;
mod market_data;
mod selling;
mod social;
mod trust;

use crate::error::ToolError;
use crate::semantics::{Capability, annotations_for};
use futures::future::BoxFuture;
use rmcp::model::{JsonObject, Tool};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use theagora_api_client::ApiClient;

pub type HandlerFuture = BoxFuture<'static, Result<Value, ToolError>>;

/// Maps validated arguments to API calls. The client is cheap to clone.
pub type Handler = fn(ApiClient, Value) -> HandlerFuture;

#[derive(Clone)]
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub capability: Capability,
    pub input_schema: Arc<JsonObject>,
    pub handler: Handler,
}

impl ToolDef {
    pub(crate) fn new(
        name: &'static str,
        description: &'static str,
        capability: Capability,
        input_schema: JsonObject,
        handler: Handler,
    ) -> Self {
        Self {
            name,
            description,
            capability,
            input_schema: Arc::new(input_schema),
            handler,
        }
    }

    /// The MCP tool definition advertised by `tools/list`.
    #[must_use]
    pub fn to_tool(&self) -> Tool {
        let mut tool = Tool::new(self.name, self.description, self.input_schema.clone());
        tool.annotations = Some(annotations_for(self.capability));
        tool
    }
}

impl std::fmt::Debug for ToolDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDef")
            .field("name", &self.name)
            .field("capability", &self.capability)
            .finish_non_exhaustive()
    }
}

/// Every tool, in advertised order.
#[must_use]
pub fn all() -> Vec<ToolDef> {
    let mut tools = Vec::new();
    tools.extend(discovery::tools());
    tools.extend(buying::tools());
    tools.extend(selling::tools());
    tools.extend(identity::tools());
    tools.extend(social::tools());
    tools.extend(trust::tools());
    tools.extend(exchange::tools());
    tools.extend(market_data::tools());
    tools.extend(analytics::tools());
    tools
}

pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::invalid_params(&e))
}

const WINDOW_DESCRIPTION: &str = "Time window (default: 7d)";
