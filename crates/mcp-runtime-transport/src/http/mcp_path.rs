//! The single 2025-03-26-profile endpoint: POST for JSON-RPC frames, GET to
//! open an additional server-initiated event stream.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::CookieJar;
use bytes::Bytes;
use mcp_runtime_server::session::{ConnectionWriter, SessionCommand, SessionId};
use mcp_wire_protocol::jsonrpc::{parse_frame, FrameParseError, InboundFrame};

use crate::channel::StreamedChannel;
use crate::http::cookie::session_cookie;
use crate::http::dispatch::{dispatch_frame, is_sole_initialize};
use crate::http::stream::streamed_response;
use crate::http::{accept_mode, extract_session_id, AppState};
use crate::TransportError;

const SESSION_ID_HEADER: &str = "Mcp-Session-Id";

/// `POST /mcp`: accept a single request/notification or a batch of them.
pub async fn post_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
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

    let session_id = extract_session_id(&headers, &jar, None, false);

    let (handle, created, id) = match session_id {
        Some(raw) => {
            let id = SessionId::from_wire(raw);
            match state.sessions.get(&id) {
                Some(handle) => (handle, false, id),
                None => return TransportError::UnknownSession(id.to_string()).into_response(),
            }
        }
        None => {
            if !is_sole_initialize(&frame) {
                return TransportError::MissingSessionId.into_response();
            }
            match state.sessions.create() {
                Ok(handle) => {
                    let id = handle.id().clone();
                    (handle, true, id)
                }
                Err(e) => return TransportError::Internal(e.to_string()).into_response(),
            }
        }
    };

    let accept = accept_mode(&headers);
    let deadline = state.server_config.timeouts.request_deadline();

    // A request whose client prefers an event stream and who already has
    // one attached is answered there instead of on this connection.
    if let InboundFrame::Single(message) = &frame {
        if accept.allows_stream() && !message.is_notification() {
            if let Some(stream) = state.streams.get(id.as_str()).map(|entry| entry.value().clone()) {
                let connection: Arc<dyn ConnectionWriter> = stream;
                let _ = handle
                    .send(SessionCommand::Inbound { message: message.clone(), connection })
                    .await;
                let mut response = StatusCode::ACCEPTED.into_response();
                insert_session_header(response.headers_mut(), id.as_str());
                return response;
            }
        }
    }

    let is_batch = matches!(&frame, InboundFrame::Batch(_));
    let responses = dispatch_frame(&handle, frame, deadline).await;

    let mut response = if responses.is_empty() {
        StatusCode::ACCEPTED.into_response()
    } else if is_batch {
        (StatusCode::OK, Json(responses)).into_response()
    } else {
        (StatusCode::OK, Json(responses.into_iter().next())).into_response()
    };

    insert_session_header(response.headers_mut(), id.as_str());
    if created {
        if let Ok(value) = HeaderValue::from_str(&session_cookie(id.as_str()).to_string()) {
            response.headers_mut().insert(axum::http::header::SET_COOKIE, value);
        }
    }
    response
}

fn insert_session_header(headers: &mut HeaderMap, id: &str) {
    if let Ok(value) = HeaderValue::from_str(id) {
        headers.insert(SESSION_ID_HEADER, value);
    }
}

/// `GET /mcp`: open an additional event stream for server-initiated
/// frames on an already-initialized session.
pub async fn get_handler(State(state): State<AppState>, headers: HeaderMap, jar: CookieJar) -> Response {
    if !accept_mode(&headers).allows_stream() {
        return TransportError::NotAcceptable.into_response();
    }
    let Some(raw) = extract_session_id(&headers, &jar, None, false) else {
        return TransportError::MissingSessionId.into_response();
    };
    let id = SessionId::from_wire(raw);
    let Some(handle) = state.sessions.get(&id) else {
        return TransportError::UnknownSession(id.to_string()).into_response();
    };

    let (writer, receiver): (StreamedChannel, _) = StreamedChannel::pair(
        state.transport_config.stream_channel_capacity,
        state.transport_config.write_timeout,
    );
    state.streams.insert(id.to_string(), Arc::new(writer));
    let _ = handle.send(SessionCommand::StreamAttached).await;

    streamed_response(receiver, state.streams.clone(), id.to_string(), handle)
}
