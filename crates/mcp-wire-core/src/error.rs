//! Standard JSON-RPC error codes and the wire error object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard and server-defined JSON-RPC error codes.
///
/// The server-defined range is `-32000..=-32099`; any other negative code a
/// caller tries to use for `Server` is normalized to `-32000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed JSON that could not be parsed at all.
    ParseError,
    /// Missing `jsonrpc`/`method`, or a duplicate in-flight id.
    InvalidRequest,
    /// The method name is not recognized, or its registry is absent.
    MethodNotFound,
    /// An executor rejected the request's arguments.
    InvalidParams,
    /// An unexpected fault (executor panic, codec failure on the response).
    InternalError,
    /// A server-defined condition (transport write failure, unknown session
    /// on a clustered node). Always normalized into `-32000..=-32099`.
    Server(i32),
    /// An application-specific code outside all reserved ranges.
    Application(i32),
}

const SERVER_RANGE_START: i32 = -32099;
const SERVER_RANGE_END: i32 = -32000;

impl ErrorCode {
    /// The numeric code to place on the wire.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::Server(code) => {
                if (SERVER_RANGE_START..=SERVER_RANGE_END).contains(&code) {
                    code
                } else {
                    SERVER_RANGE_END
                }
            }
            Self::Application(code) => code,
        }
    }

    /// The standard short message for this code.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid Request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
            Self::Server(_) => "Server error",
            Self::Application(_) => "Application error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

/// The `{code, message, data}` object carried on a JSON-RPC error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireError {
    /// Numeric error code.
    pub code: i32,
    /// Human-readable message.
    pub message: String,
    /// Optional structured detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl WireError {
    /// Build an error from a code and message, no extra data.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data: None,
        }
    }

    /// Build an error using the code's standard message.
    #[must_use]
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.message())
    }

    /// Attach structured data to an existing error.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn server_error_out_of_range_normalizes() {
        let code = ErrorCode::Server(-1);
        assert_eq!(code.code(), -32000);
    }

    #[test]
    fn server_error_in_range_preserved() {
        let code = ErrorCode::Server(-32050);
        assert_eq!(code.code(), -32050);
    }

    #[test]
    fn standard_codes_match_spec() {
        assert_eq!(ErrorCode::ParseError.code(), -32700);
        assert_eq!(ErrorCode::InvalidRequest.code(), -32600);
        assert_eq!(ErrorCode::MethodNotFound.code(), -32601);
        assert_eq!(ErrorCode::InvalidParams.code(), -32602);
        assert_eq!(ErrorCode::InternalError.code(), -32603);
    }

    #[test]
    fn wire_error_carries_data() {
        let err = WireError::from_code(ErrorCode::InvalidParams)
            .with_data(serde_json::json!({"field": "name"}));
        assert_eq!(err.code, -32602);
        assert!(err.data.is_some());
    }
}
