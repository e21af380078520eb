//! The 2024-11-05-profile message endpoint: every frame posted here is
//! routed to the session's already-open `/sse` stream; the stream carries
//! the actual response, so this handler only ever answers 202 or an error.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::CookieJar;
use bytes::Bytes;
use mcp_wire_protocol::jsonrpc::{parse_frame, FrameParseError, InboundFrame};

use crate::http::{extract_session_id, AppState, SessionQuery};
use crate::TransportError;
use mcp_runtime_server::session::{ConnectionWriter, SessionCommand, SessionId};

/// `POST /messages`: forward every frame to the session's attached stream.
pub async fn post_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Query(query): Query<SessionQuery>,
    body: Bytes,
) -> Response {
    if body.len() > state.server_config.limits.max_message_size {
        return TransportError::PayloadTooLarge.into_response();
    }

    let body_str = match std::str::from_utf8(&body) {
        Ok(s) => s,
        Err(e) => return TransportError::Parse(e.to_string()).into_response(),
    };
    let frame = match parse_frame(body_str) {
        Ok(frame) => frame,
        Err(FrameParseError::NotJson(message)) => return TransportError::Parse(message).into_response(),
        Err(FrameParseError::InvalidRequest(message)) => {
            return TransportError::InvalidRequest(message).into_response()
        }
    };

    let Some(raw) = extract_session_id(&headers, &jar, Some(&query), true) else {
        return TransportError::MissingSessionId.into_response();
    };
    let id = SessionId::from_wire(raw);

    let Some(handle) = state.sessions.get(&id) else {
        return TransportError::UnknownSession(id.to_string()).into_response();
    };
    let Some(stream) = state.streams.get(id.as_str()).map(|entry| entry.value().clone()) else {
        return TransportError::StreamUnavailable(id.to_string()).into_response();
    };

    let messages = match frame {
        InboundFrame::Single(message) => vec![message],
        InboundFrame::Batch(messages) => messages,
    };
    for message in messages {
        let connection: Arc<dyn ConnectionWriter> = stream.clone();
        let _ = handle.send(SessionCommand::Inbound { message, connection }).await;
    }

    (axum::http::StatusCode::ACCEPTED, Json(serde_json::json!({}))).into_response()
}
