//! Tool descriptors and the `tools/*` request/result shapes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::CallToolResult;

/// A tool the server exposes, as advertised via `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Unique programmatic name.
    pub name: String,
    /// Human-readable title, if distinct from `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema describing the `arguments` map `tools/call` expects.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// `tools/list` result: a page of tools plus an opaque cursor for the next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResult {
    /// The tools in this page.
    pub tools: Vec<Tool>,
    /// Opaque cursor to pass as `cursor` to fetch the next page, if any.
    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// `tools/get` request params: look up a single descriptor by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetToolRequest {
    /// The tool's name.
    pub name: String,
}

/// `tools/call` request params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolRequest {
    /// The tool to invoke.
    pub name: String,
    /// Arguments passed to the tool, validated against the tool's own
    /// schema by the executor, not by this layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<HashMap<String, Value>>,
}

/// Wrap a raw executor return value into the content envelope, per the
/// dispatch rules: an envelope passes through unchanged, a string becomes a
/// single text block, anything else is JSON-serialized into one.
#[must_use]
pub fn wrap_tool_result(raw: Value) -> CallToolResult {
    if let Ok(already) = serde_json::from_value::<CallToolResult>(raw.clone()) {
        return already;
    }
    match raw {
        Value::String(text) => CallToolResult::success(vec![crate::content::ContentBlock::text(text)]),
        other => {
            let text = serde_json::to_string(&other).unwrap_or_default();
            CallToolResult::success(vec![crate::content::ContentBlock::text(text)])
        }
    }
}
