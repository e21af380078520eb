//! Transport-layer errors: everything that can go wrong before a message
//! ever reaches a session actor, mapped onto the HTTP status codes and
//! JSON-RPC error bodies from the error-handling design (§7).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mcp_wire_protocol::jsonrpc::{JsonRpcError, JsonRpcResponse};
use mcp_wire_core::ErrorCode;

/// Errors raised by the HTTP dispatcher itself, distinct from
/// [`mcp_runtime_server::ServerError`], which only ever sees a session
/// that already exists.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// A session id was supplied but no session is resident under it.
    #[error("unknown session: {0}")]
    UnknownSession(String),

    /// The request body was not valid JSON at all.
    #[error("parse error: {0}")]
    Parse(String),

    /// The request body was valid JSON but not a valid request/
    /// notification/batch shape (e.g. missing `jsonrpc`/`method`).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No session id was supplied and the frame was not a sole
    /// `initialize` request — the only case the dispatcher can mint a
    /// session for on the fly.
    #[error("a session id is required outside of the initial `initialize` request")]
    MissingSessionId,

    /// The request body exceeded the configured size ceiling.
    #[error("request body exceeds the configured maximum size")]
    PayloadTooLarge,

    /// The client's `Accept` header ruled out every response shape this
    /// dispatcher can produce (e.g. neither JSON nor event-stream).
    #[error("accept header does not permit any response this server can produce")]
    NotAcceptable,

    /// The session exists but has no attached event stream to read from,
    /// or the negotiated profile does not expose this path.
    #[error("no compatible event stream is available: {0}")]
    StreamUnavailable(String),

    /// A fault that does not fit the categories above.
    #[error("internal transport error: {0}")]
    Internal(String),
}

impl IntoResponse for TransportError {
    fn into_response(self) -> Response {
        match self {
            Self::UnknownSession(_) => StatusCode::NOT_FOUND.into_response(),
            Self::Parse(message) => (
                StatusCode::BAD_REQUEST,
                Json(JsonRpcResponse::parse_error(message)),
            )
                .into_response(),
            Self::InvalidRequest(message) => {
                let error = JsonRpcError::new(ErrorCode::InvalidRequest, message);
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            }
            Self::MissingSessionId => {
                let error = JsonRpcError::new(ErrorCode::InvalidRequest, self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            }
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE.into_response(),
            Self::NotAcceptable => StatusCode::NOT_ACCEPTABLE.into_response(),
            Self::StreamUnavailable(_) => StatusCode::NOT_FOUND.into_response(),
            Self::Internal(message) => {
                let error = JsonRpcError::new(ErrorCode::InternalError, message);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_session_maps_to_404() {
        let response = TransportError::UnknownSession("abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn parse_error_maps_to_400() {
        let response = TransportError::Parse("bad json".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_request_maps_to_400() {
        let response = TransportError::InvalidRequest("missing method".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
