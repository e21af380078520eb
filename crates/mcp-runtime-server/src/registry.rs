//! Registry traits for the three built-in feature families.
//!
//! These are external collaborators, not implementations: per the design's
//! non-goals, no in-memory tool/prompt/resource registry ships with this
//! crate. An embedding binary supplies one by implementing the relevant
//! trait and handing it to the matching executor in `dispatch`.

use std::collections::HashMap;

use mcp_wire_protocol::types::{Prompt, PromptMessage, Resource, ResourceTemplate, Tool};
use serde_json::Value;

/// A page of items plus an opaque cursor for the next page.
pub struct Page<T> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Cursor to request the next page, `None` if this was the last.
    pub next_cursor: Option<String>,
}

/// Resolves and invokes tools.
pub trait ToolRegistry: Send + Sync {
    /// List tools, optionally continuing from a prior page's cursor.
    fn list(&self, cursor: Option<&str>) -> Page<Tool>;

    /// Look up one tool's descriptor by name.
    fn get(&self, name: &str) -> Option<Tool>;

    /// Invoke a tool by name. `Err` carries a human-readable message; it is
    /// always wrapped into a content envelope with `isError = true` by the
    /// caller, never surfaced as a JSON-RPC error.
    fn call(&self, name: &str, arguments: Option<HashMap<String, Value>>) -> Result<Value, String>;
}

/// Resolves and renders prompts.
pub trait PromptRegistry: Send + Sync {
    /// List prompts, optionally continuing from a prior page's cursor.
    fn list(&self, cursor: Option<&str>) -> Page<Prompt>;

    /// Look up one prompt's descriptor by name.
    fn get(&self, name: &str) -> Option<Prompt>;

    /// Render a prompt's message sequence, with `{{name}}` placeholders in
    /// text content substituted from `arguments` by the caller.
    fn render(&self, name: &str) -> Option<(Option<String>, Vec<PromptMessage>)>;
}

/// Resolves, reads and (optionally) watches resources.
pub trait ResourceRegistry: Send + Sync {
    /// List resources, optionally continuing from a prior page's cursor.
    fn list(&self, cursor: Option<&str>) -> Page<Resource>;

    /// List URI templates describing families of resources.
    fn list_templates(&self, cursor: Option<&str>) -> Page<ResourceTemplate>;

    /// Read a resource's contents by URI.
    fn read(&self, uri: &str) -> Option<Value>;

    /// Subscribe to change notifications for a URI. Registries that don't
    /// support subscriptions may leave this a no-op; the capability
    /// advertisement (`resources.subscribe`) is what tells clients whether
    /// to expect updates.
    fn subscribe(&self, uri: &str);

    /// Cancel a prior subscription.
    fn unsubscribe(&self, uri: &str);
}
