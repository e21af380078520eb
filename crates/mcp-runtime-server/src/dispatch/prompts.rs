//! The `prompts/*` executor.

use std::collections::HashMap;
use std::sync::Arc;

use mcp_wire_core::RequestContext;
use mcp_wire_protocol::content::ContentBlock;
use mcp_wire_protocol::types::prompts::render_template;
use mcp_wire_protocol::types::{GetPromptRequest, GetPromptResult, ListPromptsResult};
use serde_json::Value;

use crate::dispatch::executor::FeatureExecutor;
use crate::error::{ServerError, ServerResult};
use crate::registry::PromptRegistry;

/// Resolves `prompts/list` and `prompts/get` against an externally
/// supplied [`PromptRegistry`].
pub struct PromptsExecutor<R: PromptRegistry> {
    registry: Arc<R>,
}

impl<R: PromptRegistry> PromptsExecutor<R> {
    /// Wrap a registry for dispatch.
    #[must_use]
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }
}

impl<R: PromptRegistry> FeatureExecutor for PromptsExecutor<R> {
    fn can_handle(&self, method: &str) -> bool {
        matches!(method, "prompts/list" | "prompts/get")
    }

    fn handle(
        &self,
        _context: &RequestContext,
        method: &str,
        params: Option<Value>,
    ) -> ServerResult<Value> {
        match method {
            "prompts/list" => {
                let cursor = params
                    .as_ref()
                    .and_then(|p| p.get("cursor"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let page = self.registry.list(cursor.as_deref());
                let result = ListPromptsResult {
                    prompts: page.items,
                    next_cursor: page.next_cursor,
                };
                serde_json::to_value(result).map_err(|e| ServerError::Internal(e.to_string()))
            }
            "prompts/get" => {
                let request: GetPromptRequest = params
                    .ok_or_else(|| ServerError::InvalidParams("missing params".to_string()))
                    .and_then(|p| {
                        serde_json::from_value(p).map_err(|e| ServerError::InvalidParams(e.to_string()))
                    })?;
                let (description, mut messages) = self
                    .registry
                    .render(&request.name)
                    .ok_or_else(|| ServerError::InvalidParams(format!("no such prompt: {}", request.name)))?;
                let arguments = request.arguments.unwrap_or_default();
                substitute_templates(&mut messages, &arguments);
                let result = GetPromptResult { description, messages };
                serde_json::to_value(result).map_err(|e| ServerError::Internal(e.to_string()))
            }
            other => Err(ServerError::MethodNotFound(other.to_string())),
        }
    }
}

/// Apply `{{name}}` substitution over every text-valued message in place.
fn substitute_templates(
    messages: &mut [mcp_wire_protocol::types::PromptMessage],
    arguments: &HashMap<String, String>,
) {
    for message in messages {
        if let ContentBlock::Text(text) = &mut message.content {
            text.text = render_template(&text.text, arguments);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_wire_protocol::content::TextContent;
    use mcp_wire_protocol::types::{Prompt, PromptMessage};

    struct FakeRegistry;

    impl PromptRegistry for FakeRegistry {
        fn list(&self, _cursor: Option<&str>) -> crate::registry::Page<Prompt> {
            crate::registry::Page {
                items: vec![Prompt {
                    name: "greet".to_string(),
                    title: None,
                    description: None,
                    arguments: None,
                }],
                next_cursor: None,
            }
        }

        fn get(&self, name: &str) -> Option<Prompt> {
            (name == "greet").then(|| Prompt {
                name: "greet".to_string(),
                title: None,
                description: None,
                arguments: None,
            })
        }

        fn render(&self, name: &str) -> Option<(Option<String>, Vec<PromptMessage>)> {
            (name == "greet").then(|| {
                (
                    None,
                    vec![PromptMessage {
                        role: "user".to_string(),
                        content: ContentBlock::Text(TextContent::new("hello {{name}}")),
                    }],
                )
            })
        }
    }

    fn context() -> RequestContext {
        RequestContext::new("prompts/get", Some(mcp_wire_core::RequestId::Number(1)))
    }

    #[test]
    fn get_substitutes_known_argument() {
        let executor = PromptsExecutor::new(Arc::new(FakeRegistry));
        let params = serde_json::json!({"name": "greet", "arguments": {"name": "world"}});
        let result = executor.handle(&context(), "prompts/get", Some(params)).unwrap();
        assert_eq!(result["messages"][0]["content"]["text"], "hello world");
    }

    #[test]
    fn get_missing_argument_leaves_placeholder() {
        let executor = PromptsExecutor::new(Arc::new(FakeRegistry));
        let params = serde_json::json!({"name": "greet", "arguments": {}});
        let result = executor.handle(&context(), "prompts/get", Some(params)).unwrap();
        assert_eq!(result["messages"][0]["content"]["text"], "hello {{name}}");
    }

    #[test]
    fn get_unknown_prompt_is_invalid_params() {
        let executor = PromptsExecutor::new(Arc::new(FakeRegistry));
        let params = serde_json::json!({"name": "nosuch"});
        let err = executor
            .handle(&context(), "prompts/get", Some(params))
            .unwrap_err();
        assert!(matches!(err, ServerError::InvalidParams(_)));
    }
}
