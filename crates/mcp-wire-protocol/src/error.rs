//! Protocol-layer error type and its mapping onto JSON-RPC error codes.

use mcp_wire_core::ErrorCode;

use crate::jsonrpc::JsonRpcError;

/// Errors raised while parsing or validating a wire frame, before a request
/// ever reaches an executor.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The body was not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// The frame was valid JSON but not a valid request/notification shape,
    /// an empty batch, or a duplicate id was seen while one was pending.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No executor claimed the method.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// An executor rejected the request's parameters.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// Client and server share no protocol version.
    #[error("unsupported protocol version: {0}")]
    UnsupportedProtocolVersion(String),

    /// Unexpected internal fault.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias for protocol-layer results.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The JSON-RPC error code this maps onto.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse(_) => ErrorCode::ParseError,
            Self::InvalidRequest(_) | Self::UnsupportedProtocolVersion(_) => {
                ErrorCode::InvalidRequest
            }
            Self::MethodNotFound(_) => ErrorCode::MethodNotFound,
            Self::InvalidParams(_) => ErrorCode::InvalidParams,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<&Error> for JsonRpcError {
    fn from(e: &Error) -> Self {
        JsonRpcError::new(e.code(), e.to_string())
    }
}

impl From<Error> for JsonRpcError {
    fn from(e: Error) -> Self {
        JsonRpcError::from(&e)
    }
}
