//! Polymorphic JSON-RPC request identifiers.
//!
//! The id is either a 64-bit integer or a string; the wire encoding must
//! preserve the concrete variant across a request/response round trip —
//! implementations must never coerce an int id into a string or vice versa.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A JSON-RPC request identifier.
///
/// Notifications are modeled at the message level (`JsonRpcMessage::Notification`
/// in `mcp-wire-protocol`, which simply has no id field) rather than by a
/// `Null` variant here, so a parsed request's id can never accidentally
/// collapse into a notification's absence of one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric identifier. Rejects values that don't fit in a signed 64-bit
    /// integer rather than silently truncating.
    Number(i64),
    /// String identifier.
    String(String),
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for RequestId {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// The id carried on a JSON-RPC *response*.
///
/// Every response except a parse-error has a concrete [`RequestId`]; a
/// parse error (the request could not even be identified) carries `null`.
/// This mirrors the wire shape directly instead of reusing `Option<RequestId>`
/// inline everywhere, so the "this is a parse error" case is self-documenting
/// at call sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseId(pub Option<RequestId>);

impl ResponseId {
    /// Wrap a request id for a normal response.
    #[must_use]
    pub fn from_request(id: RequestId) -> Self {
        Self(Some(id))
    }

    /// The null id used on parse-error responses.
    #[must_use]
    pub fn null() -> Self {
        Self(None)
    }

    /// Borrow the underlying request id, if present.
    #[must_use]
    pub fn as_request_id(&self) -> Option<&RequestId> {
        self.0.as_ref()
    }

    /// True for the parse-error null id.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

impl From<RequestId> for ResponseId {
    fn from(id: RequestId) -> Self {
        Self::from_request(id)
    }
}
