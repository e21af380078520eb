//! The feature-executor capability: `{can_handle, handle}`.

use mcp_wire_core::RequestContext;
use serde_json::Value;

use crate::error::ServerResult;

/// A pluggable resolver for one method family (tools, prompts, resources,
/// utilities, or an embedding binary's own custom family).
///
/// Executors are tried in registration order by [`super::DispatchCore`];
/// the first whose `can_handle` returns true owns the method.
pub trait FeatureExecutor: Send + Sync {
    /// Whether this executor resolves `method`.
    fn can_handle(&self, method: &str) -> bool;

    /// Resolve `method`. `params` is the request's raw `params` value,
    /// `None` for a params-less call. The return value is the raw
    /// executor result before any envelope wrapping — for every method
    /// except `tools/call` it becomes the JSON-RPC `result` verbatim; for
    /// `tools/call` the dispatch core wraps it into the content envelope.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::ServerError`] for any method except
    /// `tools/call`, whose failures the core converts into a content
    /// envelope with `isError = true` rather than propagating as a
    /// JSON-RPC error.
    fn handle(&self, context: &RequestContext, method: &str, params: Option<Value>) -> ServerResult<Value>;
}
