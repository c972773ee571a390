//! Tool capability classes and their MCP annotations.

use rmcp::model::ToolAnnotations;

/// How a tool affects the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Reads state only.
    ReadOnly,
    /// Changes state; repeating the call has additional effect (new escrow, new order, ...).
    Destructive,
    /// Changes state; repeating the call with the same arguments has no additional effect.
    DestructiveIdempotent,
}

/// Generate MCP tool annotations for a capability class.
///
/// `openWorldHint` is always `true`: every tool talks to the remote marketplace.
#[must_use]
pub fn annotations_for(capability: Capability) -> ToolAnnotations {
    let open_world_hint = Some(true);

    match capability {
        Capability::ReadOnly => ToolAnnotations {
            title: None,
            read_only_hint: Some(true),
            destructive_hint: Some(false),
            idempotent_hint: Some(true),
            open_world_hint,
        },
        Capability::Destructive => ToolAnnotations {
            title: None,
            read_only_hint: Some(false),
            destructive_hint: Some(true),
            idempotent_hint: Some(false),
            open_world_hint,
        },
        Capability::DestructiveIdempotent => ToolAnnotations {
            title: None,
            read_only_hint: Some(false),
            destructive_hint: Some(true),
            idempotent_hint: Some(true),
            open_world_hint,
        },
    }
}
