//! The process-wide session map: many readers, single writer per key on
//! create/destroy (§5).

use std::sync::Arc;

use dashmap::DashMap;
use mcp_wire_protocol::capabilities::ServerCapabilities;

use crate::config::ServerConfig;
use crate::dispatch::DispatchCore;
use crate::error::{ServerError, ServerResult};
use crate::session::actor::{self, SessionHandle};
use crate::session::id::SessionId;

/// Owns the concurrent `session id -> actor handle` map and mints/destroys
/// sessions. Backed by `dashmap::DashMap`, which shards internally by a
/// multiple of the available parallelism — no extra sharding layer is
/// hand-rolled on top of it.
pub struct SessionRegistry {
    sessions: DashMap<SessionId, SessionHandle>,
    dispatch: Arc<DispatchCore>,
    server_capabilities: ServerCapabilities,
    config: ServerConfig,
}

impl SessionRegistry {
    /// Build an empty registry.
    #[must_use]
    pub fn new(dispatch: Arc<DispatchCore>, server_capabilities: ServerCapabilities, config: ServerConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            dispatch,
            server_capabilities,
            config,
        }
    }

    /// Mint a new session id, spawn its actor, and insert it.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Internal`] if `max_sessions` is already
    /// reached.
    pub fn create(&self) -> ServerResult<SessionHandle> {
        if self.sessions.len() >= self.config.limits.max_sessions {
            return Err(ServerError::Internal("session capacity reached".to_string()));
        }
        let id = SessionId::new();
        let handle = actor::spawn(
            id.clone(),
            self.server_capabilities.clone(),
            self.dispatch.clone(),
            self.config.limits.channel_capacity,
        );
        // Insertion under a duplicate id is an error per §5; new ids are
        // 32 bytes of randomness, so a collision here indicates entropy
        // failure rather than a race to be retried.
        if self.sessions.insert(id.clone(), handle.clone()).is_some() {
            return Err(ServerError::Internal(format!("duplicate session id: {id}")));
        }
        Ok(handle)
    }

    /// Look up a session by id.
    #[must_use]
    pub fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    /// Remove and return a session's handle, if present.
    pub fn remove(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions.remove(id).map(|(_, handle)| handle)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the registry holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// All currently live session ids, for the idle-reaper sweep.
    #[must_use]
    pub fn ids(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|entry| entry.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SessionRegistry {
        SessionRegistry::new(
            Arc::new(DispatchCore::builder().with_utilities().build()),
            ServerCapabilities::default(),
            ServerConfig::default(),
        )
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let registry = registry();
        let handle = tokio_test::assert_ok!(registry.create());
        assert!(registry.get(handle.id()).is_some());
    }

    #[tokio::test]
    async fn remove_drops_the_entry() {
        let registry = registry();
        let handle = registry.create().unwrap();
        let id = handle.id().clone();
        registry.remove(&id);
        assert!(registry.get(&id).is_none());
    }

    #[tokio::test]
    async fn capacity_limit_is_enforced() {
        let mut config = ServerConfig::default();
        config.limits.max_sessions = 1;
        let registry = SessionRegistry::new(
            Arc::new(DispatchCore::builder().with_utilities().build()),
            ServerCapabilities::default(),
            config,
        );
        registry.create().unwrap();
        assert!(registry.create().is_err());
    }
}
