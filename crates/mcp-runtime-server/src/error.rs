//! The server-layer error taxonomy.
//!
//! `ServerError` is the only error type surfaced to an embedding binary; it
//! wraps the lower crates' errors via `#[from]` and converts totally onto
//! `JsonRpcError` so the dispatcher always has a wire-level error to send
//! regardless of which layer failed.

use mcp_wire_core::ErrorCode;
use mcp_wire_protocol::JsonRpcError;

/// Convenience alias for server-layer results.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Errors raised by the session actor, pending-request table, executor
/// chain, or configuration loader.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ServerError {
    /// Wire-level framing/validation failure.
    #[error(transparent)]
    Protocol(#[from] mcp_wire_protocol::Error),

    /// A method was dispatched but no executor's `can_handle` claimed it.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// A request arrived with an id already pending in this session.
    #[error("duplicate request id while a prior request is pending")]
    DuplicateRequestId,

    /// A method was used outside the session state that permits it.
    #[error("method '{method}' is not valid in state '{state}'")]
    InvalidStateTransition {
        /// The method that was attempted.
        method: String,
        /// The session's current state.
        state: &'static str,
    },

    /// Client and server share no protocol version.
    #[error("no overlapping protocol version; server supports {supported:?}")]
    UnsupportedProtocolVersion {
        /// Versions this server supports, for the error's `data` field.
        supported: Vec<&'static str>,
    },

    /// An executor returned malformed or rejected arguments.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// An executor panicked or returned an unexpected internal fault.
    #[error("internal error: {0}")]
    Internal(String),

    /// A request's deadline elapsed before an executor produced a result.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured deadline that elapsed.
        timeout_ms: u64,
    },

    /// Configuration failed to load or validate.
    #[error("configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    /// The session id requested does not exist (already expired, destroyed,
    /// or never created).
    #[error("unknown session: {0}")]
    UnknownSession(String),
}

impl ServerError {
    /// The JSON-RPC error code this maps onto.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Protocol(e) => e.code(),
            Self::MethodNotFound(_) => ErrorCode::MethodNotFound,
            Self::DuplicateRequestId | Self::InvalidStateTransition { .. } => {
                ErrorCode::InvalidRequest
            }
            Self::InvalidParams(_) | Self::UnsupportedProtocolVersion { .. } => {
                ErrorCode::InvalidParams
            }
            Self::Internal(_) | Self::Configuration(_) | Self::UnknownSession(_) => {
                ErrorCode::InternalError
            }
            Self::Timeout { .. } => ErrorCode::InternalError,
        }
    }
}

impl From<&ServerError> for JsonRpcError {
    fn from(e: &ServerError) -> Self {
        let error = JsonRpcError::new(e.code(), e.to_string());
        if let ServerError::UnsupportedProtocolVersion { supported } = e {
            return error.with_data(serde_json::json!({ "supported": supported }));
        }
        error
    }
}

impl From<ServerError> for JsonRpcError {
    fn from(e: ServerError) -> Self {
        JsonRpcError::from(&e)
    }
}
