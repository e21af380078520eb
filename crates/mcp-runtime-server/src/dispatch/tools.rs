//! The `tools/*` executor.

use std::sync::Arc;

use mcp_wire_core::RequestContext;
use mcp_wire_protocol::types::tools::wrap_tool_result;
use mcp_wire_protocol::types::{CallToolRequest, GetToolRequest, ListToolsResult};
use serde_json::Value;

use crate::dispatch::executor::FeatureExecutor;
use crate::error::{ServerError, ServerResult};
use crate::registry::ToolRegistry;

/// Resolves `tools/list`, `tools/get` and `tools/call` against an
/// externally supplied [`ToolRegistry`].
pub struct ToolsExecutor<R: ToolRegistry> {
    registry: Arc<R>,
}

impl<R: ToolRegistry> ToolsExecutor<R> {
    /// Wrap a registry for dispatch.
    #[must_use]
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }
}

impl<R: ToolRegistry> FeatureExecutor for ToolsExecutor<R> {
    fn can_handle(&self, method: &str) -> bool {
        matches!(method, "tools/list" | "tools/get" | "tools/call")
    }

    fn handle(
        &self,
        _context: &RequestContext,
        method: &str,
        params: Option<Value>,
    ) -> ServerResult<Value> {
        match method {
            "tools/list" => {
                let cursor = params
                    .as_ref()
                    .and_then(|p| p.get("cursor"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let page = self.registry.list(cursor.as_deref());
                let result = ListToolsResult {
                    tools: page.items,
                    next_cursor: page.next_cursor,
                };
                serde_json::to_value(result).map_err(|e| ServerError::Internal(e.to_string()))
            }
            "tools/get" => {
                let request: GetToolRequest = params
                    .ok_or_else(|| ServerError::InvalidParams("missing params".to_string()))
                    .and_then(|p| {
                        serde_json::from_value(p).map_err(|e| ServerError::InvalidParams(e.to_string()))
                    })?;
                let tool = self
                    .registry
                    .get(&request.name)
                    .ok_or_else(|| ServerError::InvalidParams(format!("no such tool: {}", request.name)))?;
                serde_json::to_value(tool).map_err(|e| ServerError::Internal(e.to_string()))
            }
            "tools/call" => {
                let request: CallToolRequest = params
                    .ok_or_else(|| ServerError::InvalidParams("missing params".to_string()))
                    .and_then(|p| {
                        serde_json::from_value(p).map_err(|e| ServerError::InvalidParams(e.to_string()))
                    })?;
                // tools/call never surfaces a JSON-RPC error: both a missing
                // tool and an executor failure become `isError = true`
                // envelopes, always returned as `Ok`.
                let envelope = match self.registry.call(&request.name, request.arguments) {
                    Ok(raw) => wrap_tool_result(raw),
                    Err(message) => mcp_wire_protocol::content::CallToolResult::failure(message),
                };
                serde_json::to_value(envelope).map_err(|e| ServerError::Internal(e.to_string()))
            }
            other => Err(ServerError::MethodNotFound(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_wire_protocol::types::Tool;
    use std::collections::HashMap;

    struct FakeRegistry;

    impl ToolRegistry for FakeRegistry {
        fn list(&self, _cursor: Option<&str>) -> crate::registry::Page<Tool> {
            crate::registry::Page {
                items: vec![Tool {
                    name: "echo".to_string(),
                    title: None,
                    description: None,
                    input_schema: serde_json::json!({}),
                }],
                next_cursor: None,
            }
        }

        fn get(&self, name: &str) -> Option<Tool> {
            (name == "echo").then(|| Tool {
                name: "echo".to_string(),
                title: None,
                description: None,
                input_schema: serde_json::json!({}),
            })
        }

        fn call(&self, name: &str, arguments: Option<HashMap<String, Value>>) -> Result<Value, String> {
            if name != "echo" {
                return Err(format!("no such tool: {name}"));
            }
            Ok(serde_json::to_value(arguments).unwrap())
        }
    }

    fn context() -> RequestContext {
        RequestContext::new("tools/call", Some(mcp_wire_core::RequestId::Number(1)))
    }

    #[test]
    fn unknown_tool_call_never_errors_at_json_rpc_level() {
        let executor = ToolsExecutor::new(Arc::new(FakeRegistry));
        let params = serde_json::json!({"name": "nosuch", "arguments": {}});
        let result = executor.handle(&context(), "tools/call", Some(params)).unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("nosuch"));
    }

    #[test]
    fn known_tool_call_wraps_success() {
        let executor = ToolsExecutor::new(Arc::new(FakeRegistry));
        let params = serde_json::json!({"name": "echo", "arguments": {"message": "hi"}});
        let result = executor.handle(&context(), "tools/call", Some(params)).unwrap();
        assert_eq!(result["isError"], false);
    }

    #[test]
    fn tools_list_returns_descriptors() {
        let executor = ToolsExecutor::new(Arc::new(FakeRegistry));
        let result = executor.handle(&context(), "tools/list", None).unwrap();
        assert_eq!(result["tools"][0]["name"], "echo");
    }

    #[test]
    fn tools_get_missing_name_is_invalid_params_not_content_envelope() {
        let executor = ToolsExecutor::new(Arc::new(FakeRegistry));
        let err = executor
            .handle(&context(), "tools/get", Some(serde_json::json!({"name": "nosuch"})))
            .unwrap_err();
        assert!(matches!(err, ServerError::InvalidParams(_)));
    }
}
