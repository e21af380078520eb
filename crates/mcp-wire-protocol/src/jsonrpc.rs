//! JSON-RPC 2.0 framing: requests, responses, notifications and batches.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use mcp_wire_core::{ErrorCode, RequestId, ResponseId};

/// The JSON-RPC version string every frame carries.
pub const JSONRPC_VERSION: &str = "2.0";

/// Zero-sized type that serializes to/from the literal string `"2.0"`.
///
/// Using a type instead of a bare `String` means a frame with the wrong
/// version fails to deserialize rather than silently being accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonRpcVersion;

impl Serialize for JsonRpcVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(JSONRPC_VERSION)
    }
}

impl<'de> Deserialize<'de> for JsonRpcVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let version = String::deserialize(deserializer)?;
        if version == JSONRPC_VERSION {
            Ok(JsonRpcVersion)
        } else {
            Err(serde::de::Error::custom(format!(
                "invalid jsonrpc version: expected '{JSONRPC_VERSION}', got '{version}'"
            )))
        }
    }
}

/// A JSON-RPC request (has an id, expects a response).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Always `"2.0"`.
    pub jsonrpc: JsonRpcVersion,
    /// Method name, e.g. `"tools/call"`.
    pub method: String,
    /// Method parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Request id; preserved verbatim in the matching response.
    pub id: RequestId,
}

impl JsonRpcRequest {
    /// Build a request.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>, id: impl Into<RequestId>) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            method: method.into(),
            params,
            id: id.into(),
        }
    }
}

/// A JSON-RPC notification (no id, no response expected).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    /// Always `"2.0"`.
    pub jsonrpc: JsonRpcVersion,
    /// Method name, e.g. `"notifications/initialized"`.
    pub method: String,
    /// Method parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    /// Build a notification.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            method: method.into(),
            params,
        }
    }
}

/// The `{code, message, data}` object on an error response.
///
/// Distinct from `mcp_wire_core::WireError` only in name, to keep this
/// crate's public surface self-contained; the two are structurally
/// identical and freely convertible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Numeric error code.
    pub code: i32,
    /// Human-readable message.
    pub message: String,
    /// Optional structured detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Build from a standard error code and message.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data: None,
        }
    }

    /// Attach structured data.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<mcp_wire_core::WireError> for JsonRpcError {
    fn from(e: mcp_wire_core::WireError) -> Self {
        Self {
            code: e.code,
            message: e.message,
            data: e.data,
        }
    }
}

/// Either a successful result or an error — mutually exclusive on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcResponsePayload {
    /// Successful result.
    Success {
        /// The result value.
        result: Value,
    },
    /// Error result.
    Error {
        /// The error object.
        error: JsonRpcError,
    },
}

/// A JSON-RPC response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Always `"2.0"`.
    pub jsonrpc: JsonRpcVersion,
    /// Result or error, never both.
    #[serde(flatten)]
    pub payload: JsonRpcResponsePayload,
    /// The originating request's id, or null for a parse-error response.
    pub id: ResponseId,
}

impl JsonRpcResponse {
    /// A success response for the given request id.
    #[must_use]
    pub fn success(result: Value, id: RequestId) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            payload: JsonRpcResponsePayload::Success { result },
            id: ResponseId::from_request(id),
        }
    }

    /// An error response for the given request id.
    #[must_use]
    pub fn error(error: JsonRpcError, id: RequestId) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            payload: JsonRpcResponsePayload::Error { error },
            id: ResponseId::from_request(id),
        }
    }

    /// A parse-error response; id is always null since the request could
    /// not be identified.
    #[must_use]
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            payload: JsonRpcResponsePayload::Error {
                error: JsonRpcError::new(ErrorCode::ParseError, message),
            },
            id: ResponseId::null(),
        }
    }

    /// True if this carries a result rather than an error.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.payload, JsonRpcResponsePayload::Success { .. })
    }

    /// The request id this responds to, `None` only for parse errors.
    #[must_use]
    pub fn request_id(&self) -> Option<&RequestId> {
        self.id.as_request_id()
    }
}

/// One element of an inbound batch or single request: either a request or a
/// notification, distinguished by the presence of `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    /// Has an id, expects a response.
    Request(JsonRpcRequest),
    /// No id, fire-and-forget.
    Notification(JsonRpcNotification),
}

impl JsonRpcMessage {
    /// The method name, regardless of variant.
    #[must_use]
    pub fn method(&self) -> &str {
        match self {
            Self::Request(r) => &r.method,
            Self::Notification(n) => &n.method,
        }
    }

    /// The request id, if this is a request.
    #[must_use]
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            Self::Request(r) => Some(&r.id),
            Self::Notification(_) => None,
        }
    }

    /// True for notifications.
    #[must_use]
    pub fn is_notification(&self) -> bool {
        matches!(self, Self::Notification(_))
    }
}

/// A parsed inbound frame: a single message, or a batch of them.
///
/// Per §4.1, a batch is a homogeneous JSON array of requests/notifications
/// dispatched element-wise; an empty batch is itself an Invalid Request.
#[derive(Debug, Clone)]
pub enum InboundFrame {
    /// A single request or notification.
    Single(JsonRpcMessage),
    /// A non-empty batch of requests/notifications.
    Batch(Vec<JsonRpcMessage>),
}

/// Why [`parse_frame`] failed, distinguishing a `-32700` parse failure from
/// a `-32600` invalid-request shape.
#[derive(Debug, Clone)]
pub enum FrameParseError {
    /// The body was not valid JSON at all.
    NotJson(String),
    /// The body was valid JSON but not a valid request/notification/batch
    /// shape (e.g. missing `jsonrpc`/`method`, or an empty batch).
    InvalidRequest(String),
}

impl fmt::Display for FrameParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotJson(message) | Self::InvalidRequest(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for FrameParseError {}

/// Parse a raw JSON body into a frame, distinguishing object vs. array shape
/// before attempting to deserialize each element so batch errors are
/// reported per-element rather than failing the whole parse.
///
/// # Errors
///
/// Returns [`FrameParseError::NotJson`] if the body is not valid JSON at
/// all, or [`FrameParseError::InvalidRequest`] if it is valid JSON but an
/// empty batch or an element is neither a request nor a notification shape.
pub fn parse_frame(body: &str) -> Result<InboundFrame, FrameParseError> {
    let value: Value = serde_json::from_str(body).map_err(|e| FrameParseError::NotJson(e.to_string()))?;
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                return Err(FrameParseError::InvalidRequest("empty batch".to_string()));
            }
            let mut messages = Vec::with_capacity(items.len());
            for item in items {
                let message: JsonRpcMessage = serde_json::from_value(item)
                    .map_err(|e| FrameParseError::InvalidRequest(e.to_string()))?;
                messages.push(message);
            }
            Ok(InboundFrame::Batch(messages))
        }
        other => {
            let message: JsonRpcMessage = serde_json::from_value(other)
                .map_err(|e| FrameParseError::InvalidRequest(e.to_string()))?;
            Ok(InboundFrame::Single(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn version_serializes_as_literal_2_0() {
        assert_eq!(serde_json::to_string(&JsonRpcVersion).unwrap(), "\"2.0\"");
    }

    #[test]
    fn version_rejects_other_strings() {
        let result: Result<JsonRpcVersion, _> = serde_json::from_str("\"1.0\"");
        assert!(result.is_err());
    }

    #[test]
    fn request_round_trips_with_int_id() {
        let req = JsonRpcRequest::new("ping", None, 1i64);
        let json = serde_json::to_string(&req).unwrap();
        let back: JsonRpcRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, RequestId::Number(1));
    }

    #[test]
    fn request_round_trips_with_string_id() {
        let req = JsonRpcRequest::new("ping", None, "abc");
        let json = serde_json::to_string(&req).unwrap();
        let back: JsonRpcRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, RequestId::String("abc".to_string()));
    }

    #[test]
    fn notification_has_no_id_field() {
        let note = JsonRpcNotification::new("notifications/initialized", None);
        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn success_and_error_are_mutually_exclusive() {
        let ok = JsonRpcResponse::success(json!({"a":1}), RequestId::Number(1));
        assert!(ok.is_success());
        let err = JsonRpcResponse::error(
            JsonRpcError::new(ErrorCode::MethodNotFound, "nope"),
            RequestId::Number(1),
        );
        assert!(!err.is_success());
    }

    #[test]
    fn parse_error_response_has_null_id() {
        let resp = JsonRpcResponse::parse_error("bad json");
        assert!(resp.request_id().is_none());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["id"], Value::Null);
    }

    #[test]
    fn parse_frame_single_request() {
        let body = r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#;
        match parse_frame(body).unwrap() {
            InboundFrame::Single(JsonRpcMessage::Request(r)) => {
                assert_eq!(r.method, "ping");
            }
            _ => panic!("expected single request"),
        }
    }

    #[test]
    fn parse_frame_single_notification_has_no_id() {
        let body = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        match parse_frame(body).unwrap() {
            InboundFrame::Single(msg) => assert!(msg.is_notification()),
            _ => panic!("expected single message"),
        }
    }

    #[test]
    fn parse_frame_batch_preserves_order() {
        let body = r#"[
            {"jsonrpc":"2.0","id":1,"method":"a"},
            {"jsonrpc":"2.0","id":2,"method":"b"}
        ]"#;
        match parse_frame(body).unwrap() {
            InboundFrame::Batch(msgs) => {
                assert_eq!(msgs.len(), 2);
                assert_eq!(msgs[0].method(), "a");
                assert_eq!(msgs[1].method(), "b");
            }
            _ => panic!("expected batch"),
        }
    }

    #[test]
    fn parse_frame_empty_batch_is_invalid_request_not_parse_error() {
        assert!(matches!(parse_frame("[]"), Err(FrameParseError::InvalidRequest(_))));
    }

    #[test]
    fn parse_frame_malformed_json_is_not_json() {
        assert!(matches!(parse_frame("{not json"), Err(FrameParseError::NotJson(_))));
    }

    #[test]
    fn parse_frame_valid_json_missing_method_is_invalid_request_not_parse_error() {
        let body = r#"{"jsonrpc":"2.0","id":1}"#;
        assert!(matches!(parse_frame(body), Err(FrameParseError::InvalidRequest(_))));
    }

    #[test]
    fn id_variants_never_coerce() {
        // Round trip through the full request->response cycle: an int id in
        // yields an int id out, a string id yields a string.
        for id in [RequestId::Number(5), RequestId::String("five".into())] {
            let req = JsonRpcRequest::new("ping", None, id.clone());
            let resp = JsonRpcResponse::success(json!({}), req.id.clone());
            assert_eq!(resp.request_id(), Some(&id));
        }
    }
}
