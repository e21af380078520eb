//! The always-available utility methods.

use mcp_wire_core::RequestContext;
use serde_json::Value;

use crate::dispatch::executor::FeatureExecutor;
use crate::error::{ServerError, ServerResult};

/// Resolves `ping`. Registered last in the executor chain before any
/// custom routes, since it never depends on an external registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct UtilitiesExecutor;

impl FeatureExecutor for UtilitiesExecutor {
    fn can_handle(&self, method: &str) -> bool {
        method == "ping"
    }

    fn handle(&self, _context: &RequestContext, method: &str, _params: Option<Value>) -> ServerResult<Value> {
        match method {
            "ping" => Ok(Value::Object(serde_json::Map::new())),
            other => Err(ServerError::MethodNotFound(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RequestContext {
        RequestContext::new("ping", Some(mcp_wire_core::RequestId::Number(1)))
    }

    #[test]
    fn ping_is_idempotent() {
        let executor = UtilitiesExecutor;
        let first = executor.handle(&context(), "ping", None).unwrap();
        let second = executor.handle(&context(), "ping", None).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, Value::Object(serde_json::Map::new()));
    }
}
