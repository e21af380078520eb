//! The session state machine and the `Session` record it drives.

use std::sync::Arc;
use std::time::{Duration, Instant};

use mcp_wire_protocol::capabilities::{ClientCapabilities, ServerCapabilities};
use serde_json::Value;

use crate::error::{ServerError, ServerResult};

/// A session's lifecycle state.
///
/// `fresh` accepts only `initialize`. `initializing` accepts only the
/// `notifications/initialized` notification (and `ping`, since utility
/// methods are always available once a session exists). `ready` accepts
/// everything. `closing` rejects new requests but drains in-flight ones.
/// `terminated` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Just created; awaiting `initialize`.
    Fresh,
    /// `initialize` handled; awaiting `notifications/initialized`.
    Initializing,
    /// Fully negotiated; all method families are routable.
    Ready,
    /// Draining in-flight requests before termination.
    Closing,
    /// Dead; the session actor has stopped and the entry will be reaped.
    Terminated,
}

impl SessionState {
    /// Short, stable name used in logs and error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Closing => "closing",
            Self::Terminated => "terminated",
        }
    }

    /// Whether `method` is accepted while the session is in this state.
    #[must_use]
    pub fn accepts(self, method: &str) -> bool {
        match self {
            Self::Fresh => method == "initialize",
            Self::Initializing => {
                method == "notifications/initialized" || method == "ping"
            }
            Self::Ready => true,
            Self::Closing | Self::Terminated => false,
        }
    }
}

/// A single session's full state, owned exclusively by its session actor.
#[derive(Debug, Clone)]
pub struct Session {
    /// Current lifecycle state.
    pub state: SessionState,
    /// Negotiated protocol version, set once `initialize` completes.
    pub protocol_version: Option<&'static str>,
    /// The client's advertised capabilities, retained for feature gating.
    pub client_capabilities: Option<ClientCapabilities>,
    /// This server's fixed capability advertisement.
    pub server_capabilities: ServerCapabilities,
    /// Whether `notifications/initialized` has been received.
    pub initialized_notified: bool,
    /// When the session was created.
    pub created_at: Instant,
    /// When the session last handled a request or attached a connection.
    pub last_activity: Instant,
    /// Opaque principal blob from the auth collaborator, if authenticated.
    pub auth_principal: Option<Arc<[u8]>>,
    /// Count of currently attached streamed connections; the idle timer is
    /// paused while this is nonzero.
    pub streamed_connections: usize,
}

impl Session {
    /// A brand-new session in the `fresh` state.
    #[must_use]
    pub fn new(server_capabilities: ServerCapabilities) -> Self {
        let now = Instant::now();
        Self {
            state: SessionState::Fresh,
            protocol_version: None,
            client_capabilities: None,
            server_capabilities,
            initialized_notified: false,
            created_at: now,
            last_activity: now,
            auth_principal: None,
            streamed_connections: 0,
        }
    }

    /// Record activity, resetting the idle clock.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Negotiate a protocol version against what this server supports,
    /// complete the `fresh -> initializing` transition, and record the
    /// client's capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::UnsupportedProtocolVersion`] if no overlap
    /// exists, and [`ServerError::InvalidStateTransition`] if called outside
    /// `fresh`.
    pub fn initialize(
        &mut self,
        requested_version: &str,
        client_capabilities: ClientCapabilities,
    ) -> ServerResult<&'static str> {
        if self.state != SessionState::Fresh {
            return Err(ServerError::InvalidStateTransition {
                method: "initialize".to_string(),
                state: self.state.name(),
            });
        }
        let negotiated = mcp_wire_core::protocol_version::negotiate(requested_version).ok_or(
            ServerError::UnsupportedProtocolVersion {
                supported: mcp_wire_core::protocol_version::SUPPORTED.to_vec(),
            },
        )?;
        self.protocol_version = Some(negotiated);
        self.client_capabilities = Some(client_capabilities);
        self.state = SessionState::Initializing;
        self.touch();
        Ok(negotiated)
    }

    /// Complete the `initializing -> ready` transition on receipt of
    /// `notifications/initialized`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidStateTransition`] if called outside
    /// `initializing`.
    pub fn mark_initialized(&mut self) -> ServerResult<()> {
        if self.state != SessionState::Initializing {
            return Err(ServerError::InvalidStateTransition {
                method: "notifications/initialized".to_string(),
                state: self.state.name(),
            });
        }
        self.initialized_notified = true;
        self.state = SessionState::Ready;
        self.touch();
        Ok(())
    }

    /// Begin graceful shutdown: no new requests are accepted, in-flight
    /// ones still drain.
    pub fn begin_closing(&mut self) {
        self.state = SessionState::Closing;
    }

    /// Finalize shutdown.
    pub fn terminate(&mut self) {
        self.state = SessionState::Terminated;
    }

    /// Whether `method` may be dispatched right now.
    #[must_use]
    pub fn accepts(&self, method: &str) -> bool {
        self.state.accepts(method)
    }

    /// A streamed connection attached; pauses the idle timer.
    pub fn attach_streamed(&mut self) {
        self.streamed_connections += 1;
        self.touch();
    }

    /// A streamed connection detached; resumes the idle timer once this
    /// reaches zero.
    pub fn detach_streamed(&mut self) {
        self.streamed_connections = self.streamed_connections.saturating_sub(1);
        self.touch();
    }

    /// Whether the idle timer should be running (no streamed connections
    /// attached).
    #[must_use]
    pub fn idle_timer_active(&self) -> bool {
        self.streamed_connections == 0
    }

    /// Whether `idle_timeout` has elapsed since the last activity, and the
    /// idle timer is not paused.
    #[must_use]
    pub fn is_idle_expired(&self, idle_timeout: Duration) -> bool {
        self.idle_timer_active() && self.last_activity.elapsed() >= idle_timeout
    }
}

/// `_meta`-style opaque passthrough, kept as a type alias so call sites read
/// intent rather than `serde_json::Value`.
pub type Meta = Value;

#[cfg(test)]
mod tests {
    use super::*;

    fn server_caps() -> ServerCapabilities {
        ServerCapabilities::default()
    }

    #[test]
    fn fresh_only_accepts_initialize() {
        let session = Session::new(server_caps());
        assert!(session.accepts("initialize"));
        assert!(!session.accepts("tools/list"));
    }

    #[test]
    fn initialize_transitions_to_initializing() {
        let mut session = Session::new(server_caps());
        let version = session
            .initialize("2025-03-26", ClientCapabilities::default())
            .unwrap();
        assert_eq!(version, "2025-03-26");
        assert_eq!(session.state, SessionState::Initializing);
    }

    #[test]
    fn initialize_rejects_unsupported_version() {
        let mut session = Session::new(server_caps());
        let err = session
            .initialize("1999-01-01", ClientCapabilities::default())
            .unwrap_err();
        assert!(matches!(err, ServerError::UnsupportedProtocolVersion { .. }));
    }

    #[test]
    fn initialize_twice_is_invalid_state_transition() {
        let mut session = Session::new(server_caps());
        session
            .initialize("2025-03-26", ClientCapabilities::default())
            .unwrap();
        let err = session
            .initialize("2025-03-26", ClientCapabilities::default())
            .unwrap_err();
        assert!(matches!(err, ServerError::InvalidStateTransition { .. }));
    }

    #[test]
    fn mark_initialized_transitions_to_ready() {
        let mut session = Session::new(server_caps());
        session
            .initialize("2025-03-26", ClientCapabilities::default())
            .unwrap();
        session.mark_initialized().unwrap();
        assert_eq!(session.state, SessionState::Ready);
        assert!(session.accepts("tools/list"));
    }

    #[test]
    fn mark_initialized_before_initialize_is_rejected() {
        let mut session = Session::new(server_caps());
        assert!(session.mark_initialized().is_err());
    }

    #[test]
    fn idle_timer_is_paused_while_a_stream_is_attached() {
        let mut session = Session::new(server_caps());
        session.attach_streamed();
        assert!(!session.idle_timer_active());
        session.detach_streamed();
        assert!(session.idle_timer_active());
    }

    #[test]
    fn closing_and_terminated_accept_nothing() {
        let mut session = Session::new(server_caps());
        session.begin_closing();
        assert!(!session.accepts("ping"));
        session.terminate();
        assert!(!session.accepts("ping"));
    }
}
