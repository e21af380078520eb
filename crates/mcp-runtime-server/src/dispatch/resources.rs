//! The `resources/*` executor.

use std::sync::Arc;

use mcp_wire_core::RequestContext;
use mcp_wire_protocol::types::{
    ListResourceTemplatesResult, ListResourcesResult, ReadResourceRequest, ReadResourceResult,
    SubscribeRequest, UnsubscribeRequest,
};
use serde_json::Value;

use crate::dispatch::executor::FeatureExecutor;
use crate::error::{ServerError, ServerResult};
use crate::registry::ResourceRegistry;

/// Resolves `resources/*` against an externally supplied
/// [`ResourceRegistry`].
pub struct ResourcesExecutor<R: ResourceRegistry> {
    registry: Arc<R>,
}

impl<R: ResourceRegistry> ResourcesExecutor<R> {
    /// Wrap a registry for dispatch.
    #[must_use]
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    fn cursor(params: &Option<Value>) -> Option<String> {
        params
            .as_ref()
            .and_then(|p| p.get("cursor"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

impl<R: ResourceRegistry> FeatureExecutor for ResourcesExecutor<R> {
    fn can_handle(&self, method: &str) -> bool {
        matches!(
            method,
            "resources/list"
                | "resources/read"
                | "resources/subscribe"
                | "resources/unsubscribe"
                | "resources/templates/list"
        )
    }

    fn handle(
        &self,
        _context: &RequestContext,
        method: &str,
        params: Option<Value>,
    ) -> ServerResult<Value> {
        match method {
            "resources/list" => {
                let page = self.registry.list(Self::cursor(&params).as_deref());
                let result = ListResourcesResult {
                    resources: page.items,
                    next_cursor: page.next_cursor,
                };
                serde_json::to_value(result).map_err(|e| ServerError::Internal(e.to_string()))
            }
            "resources/templates/list" => {
                let page = self
                    .registry
                    .list_templates(Self::cursor(&params).as_deref());
                let result = ListResourceTemplatesResult {
                    resource_templates: page.items,
                    next_cursor: page.next_cursor,
                };
                serde_json::to_value(result).map_err(|e| ServerError::Internal(e.to_string()))
            }
            "resources/read" => {
                let request: ReadResourceRequest = params
                    .ok_or_else(|| ServerError::InvalidParams("missing params".to_string()))
                    .and_then(|p| {
                        serde_json::from_value(p).map_err(|e| ServerError::InvalidParams(e.to_string()))
                    })?;
                let contents = self
                    .registry
                    .read(&request.uri)
                    .ok_or_else(|| ServerError::InvalidParams(format!("no such resource: {}", request.uri)))?;
                let contents = serde_json::from_value(contents)
                    .map_err(|e| ServerError::Internal(e.to_string()))?;
                let result = ReadResourceResult { contents: vec![contents] };
                serde_json::to_value(result).map_err(|e| ServerError::Internal(e.to_string()))
            }
            "resources/subscribe" => {
                let request: SubscribeRequest = params
                    .ok_or_else(|| ServerError::InvalidParams("missing params".to_string()))
                    .and_then(|p| {
                        serde_json::from_value(p).map_err(|e| ServerError::InvalidParams(e.to_string()))
                    })?;
                self.registry.subscribe(&request.uri);
                Ok(Value::Object(serde_json::Map::new()))
            }
            "resources/unsubscribe" => {
                let request: UnsubscribeRequest = params
                    .ok_or_else(|| ServerError::InvalidParams("missing params".to_string()))
                    .and_then(|p| {
                        serde_json::from_value(p).map_err(|e| ServerError::InvalidParams(e.to_string()))
                    })?;
                self.registry.unsubscribe(&request.uri);
                Ok(Value::Object(serde_json::Map::new()))
            }
            other => Err(ServerError::MethodNotFound(other.to_string())),
        }
    }
}
