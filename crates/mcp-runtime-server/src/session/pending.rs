//! Pending-request bookkeeping: the table a session actor consults to route
//! an executor's return value back to the connection that asked for it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use mcp_wire_core::RequestId;
use mcp_wire_protocol::JsonRpcResponse;

use crate::error::{ServerError, ServerResult};

/// Writes a completed response to whichever connection is still waiting
/// for it. Implemented in the transport crate by both the streamed and
/// one-shot connection actors; this crate only ever holds the trait object.
pub trait ConnectionWriter: Send + Sync {
    /// Deliver a response. Implementations swallow write failures as a
    /// connection closure rather than propagating them here — by the time
    /// a response is ready the originating HTTP request may already be
    /// gone.
    fn write_response(&self, response: JsonRpcResponse);
}

struct PendingEntry {
    connection: Arc<dyn ConnectionWriter>,
    deadline: Instant,
}

/// Keyed by request id, holding at most one entry per id: the partial-
/// function invariant from §3 ("at most one pending entry per (session,
/// id)").
#[derive(Default)]
pub struct PendingTable {
    entries: HashMap<RequestId, PendingEntry>,
}

impl PendingTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new in-flight request.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::DuplicateRequestId`] if `id` is already
    /// pending — a duplicate id while a prior request is in flight is
    /// Invalid Request, not a silent overwrite.
    pub fn insert(
        &mut self,
        id: RequestId,
        connection: Arc<dyn ConnectionWriter>,
        deadline: Instant,
    ) -> ServerResult<()> {
        if self.entries.contains_key(&id) {
            return Err(ServerError::DuplicateRequestId);
        }
        self.entries.insert(id, PendingEntry { connection, deadline });
        Ok(())
    }

    /// Remove and return the entry for `id`, if present — the executor's
    /// return path: look up, write via the stored connection, then forget
    /// it.
    pub fn take(&mut self, id: &RequestId) -> Option<Arc<dyn ConnectionWriter>> {
        self.entries.remove(id).map(|entry| entry.connection)
    }

    /// Drop every entry bound to `connection` without writing a response —
    /// responses for a connection that already closed are discarded.
    pub fn discard_for_connection(&mut self, connection: &Arc<dyn ConnectionWriter>) {
        self.entries
            .retain(|_, entry| !Arc::ptr_eq(&entry.connection, connection));
    }

    /// Ids whose deadline has elapsed as of `now`, for the caller to expire
    /// with an internal-error response.
    #[must_use]
    pub fn expired(&self, now: Instant) -> Vec<RequestId> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no requests are in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
