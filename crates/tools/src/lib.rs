//! Tool catalog for the Theagora marketplace.
//!
//! Every tool pairs a JSON Schema for its arguments and a set of MCP annotations with a handler
//! that maps the validated arguments onto one or more [`theagora_api_client::ApiClient`] calls.
//! [`ToolRegistry`] is the single entry point: list the catalog, or call a tool by name and get a
//! [`rmcp::model::CallToolResult`] back.

pub mod catalog;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod schema;
pub mod semantics;
mod validation;

pub use error::{RegistryError, ToolError};
pub use registry::ToolRegistry;
pub use semantics::Capability;
