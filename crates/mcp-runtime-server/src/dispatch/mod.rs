//! The dispatch core: a registration-ordered chain of [`FeatureExecutor`]s.
//!
//! Built in a fixed family order — tools, prompts, resources, utilities,
//! then any custom executors an embedding binary registers — mirroring the
//! teacher's custom-route fallback. The first executor whose `can_handle`
//! claims a method owns it; if none do, dispatch fails with
//! `MethodNotFound`, which covers the "registry-absent" case for free: a
//! method family with no registry installed simply has no executor to
//! claim it.

pub mod executor;
pub mod prompts;
pub mod resources;
pub mod tools;
pub mod utilities;

use std::sync::Arc;

use mcp_wire_core::RequestContext;
use serde_json::Value;

pub use executor::FeatureExecutor;
use prompts::PromptsExecutor;
use resources::ResourcesExecutor;
use tools::ToolsExecutor;
use utilities::UtilitiesExecutor;

use crate::error::{ServerError, ServerResult};
use crate::registry::{PromptRegistry, ResourceRegistry, ToolRegistry};

/// Builds a [`DispatchCore`] with executors in registration order.
#[derive(Default)]
pub struct DispatchCoreBuilder {
    executors: Vec<Box<dyn FeatureExecutor>>,
}

impl DispatchCoreBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool registry, claiming `tools/*`.
    #[must_use]
    pub fn with_tools<R: ToolRegistry + 'static>(mut self, registry: Arc<R>) -> Self {
        self.executors.push(Box::new(ToolsExecutor::new(registry)));
        self
    }

    /// Register a prompt registry, claiming `prompts/*`.
    #[must_use]
    pub fn with_prompts<R: PromptRegistry + 'static>(mut self, registry: Arc<R>) -> Self {
        self.executors.push(Box::new(PromptsExecutor::new(registry)));
        self
    }

    /// Register a resource registry, claiming `resources/*`.
    #[must_use]
    pub fn with_resources<R: ResourceRegistry + 'static>(mut self, registry: Arc<R>) -> Self {
        self.executors.push(Box::new(ResourcesExecutor::new(registry)));
        self
    }

    /// Register the always-available utility methods (`ping`).
    #[must_use]
    pub fn with_utilities(mut self) -> Self {
        self.executors.push(Box::new(UtilitiesExecutor));
        self
    }

    /// Register a custom executor, tried after every built-in family.
    #[must_use]
    pub fn with_custom(mut self, executor: Box<dyn FeatureExecutor>) -> Self {
        self.executors.push(executor);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> DispatchCore {
        DispatchCore { executors: self.executors }
    }
}

/// The assembled executor chain a session actor dispatches requests
/// through.
pub struct DispatchCore {
    executors: Vec<Box<dyn FeatureExecutor>>,
}

impl DispatchCore {
    /// Start building a dispatch core.
    #[must_use]
    pub fn builder() -> DispatchCoreBuilder {
        DispatchCoreBuilder::new()
    }

    /// Resolve and invoke `method`, trying each registered executor in
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::MethodNotFound`] if no executor claims the
    /// method, or whatever error the claiming executor's `handle` returns.
    pub fn dispatch(
        &self,
        context: &RequestContext,
        method: &str,
        params: Option<Value>,
    ) -> ServerResult<Value> {
        for executor in &self.executors {
            if executor.can_handle(method) {
                return executor.handle(context, method, params);
            }
        }
        Err(ServerError::MethodNotFound(method.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RequestContext {
        RequestContext::new("ping", Some(mcp_wire_core::RequestId::Number(1)))
    }

    #[test]
    fn empty_core_reports_method_not_found() {
        let core = DispatchCore::builder().build();
        let err = core.dispatch(&context(), "ping", None).unwrap_err();
        assert!(matches!(err, ServerError::MethodNotFound(_)));
    }

    #[test]
    fn utilities_handles_ping_once_registered() {
        let core = DispatchCore::builder().with_utilities().build();
        let result = core.dispatch(&context(), "ping", None).unwrap();
        assert_eq!(result, Value::Object(serde_json::Map::new()));
    }

    #[test]
    fn absent_tool_registry_yields_method_not_found_not_internal_error() {
        let core = DispatchCore::builder().with_utilities().build();
        let err = core.dispatch(&context(), "tools/list", None).unwrap_err();
        assert!(matches!(err, ServerError::MethodNotFound(_)));
    }
}
