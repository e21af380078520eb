//! Per-request context threaded from the HTTP dispatcher through the
//! session actor into executor invocation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::id::RequestId;

/// Default per-request deadline when none is configured (§5: 30s).
pub const DEFAULT_REQUEST_DEADLINE: Duration = Duration::from_secs(30);

/// Ambient data available to an executor while it handles one request.
///
/// The core never inspects the shape of `auth_principal` — it is an opaque
/// blob produced and consumed by an external auth collaborator (§4.6).
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The session this request belongs to, if any (absent before `initialize`
    /// completes, since the dispatcher mints the session id from its result).
    pub session_id: Option<String>,
    /// The request's JSON-RPC id, `None` for notifications.
    pub request_id: Option<RequestId>,
    /// The method being dispatched.
    pub method: String,
    /// Deadline by which a response must be produced or the pending entry
    /// expires with an internal-error response.
    pub deadline: Instant,
    /// Opaque, auth-collaborator-defined principal bytes.
    pub auth_principal: Option<Arc<[u8]>>,
    /// Wall-clock time the context was built, for log correlation across
    /// processes (`Instant` is process-local and can't be).
    pub received_at: chrono::DateTime<chrono::Utc>,
}

impl RequestContext {
    /// Build a context for a request with the default deadline.
    #[must_use]
    pub fn new(method: impl Into<String>, request_id: Option<RequestId>) -> Self {
        Self {
            session_id: None,
            request_id,
            method: method.into(),
            deadline: Instant::now() + DEFAULT_REQUEST_DEADLINE,
            auth_principal: None,
            received_at: chrono::Utc::now(),
        }
    }

    /// Attach a session id.
    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Override the deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = deadline;
        self
    }

    /// Attach an opaque auth principal.
    #[must_use]
    pub fn with_auth_principal(mut self, principal: Arc<[u8]>) -> Self {
        self.auth_principal = Some(principal);
        self
    }

    /// Whether this context represents a notification (no response expected).
    #[must_use]
    pub fn is_notification(&self) -> bool {
        self.request_id.is_none()
    }

    /// Remaining time until the deadline, zero if already past.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// True once the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_has_no_request_id() {
        let ctx = RequestContext::new("ping", None);
        assert!(ctx.is_notification());
    }

    #[test]
    fn request_carries_id() {
        let ctx = RequestContext::new("ping", Some(RequestId::Number(1)));
        assert!(!ctx.is_notification());
    }

    #[test]
    fn deadline_defaults_to_thirty_seconds_out() {
        let ctx = RequestContext::new("ping", None);
        let remaining = ctx.remaining();
        assert!(remaining <= DEFAULT_REQUEST_DEADLINE);
        assert!(remaining > Duration::from_secs(29));
    }

    #[test]
    fn explicit_past_deadline_is_expired() {
        let ctx = RequestContext::new("ping", None)
            .with_deadline(Instant::now() - Duration::from_secs(1));
        assert!(ctx.is_expired());
    }
}
