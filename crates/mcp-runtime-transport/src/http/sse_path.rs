//! The 2024-11-05-profile event-stream endpoint: a client opens this once
//! and every subsequent response, including the reply to `initialize`
//! itself, arrives on it; the matching `POST /messages` handler only ever
//! answers 202.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use mcp_runtime_server::session::SessionCommand;

use crate::channel::StreamedChannel;
use crate::http::accept_mode;
use crate::http::stream::streamed_response;
use crate::http::AppState;
use crate::TransportError;

/// `GET /sse`: mint a new session, open its event stream, and emit the
/// `endpoint` event carrying the URL subsequent `POST`s must target.
pub async fn get_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !accept_mode(&headers).allows_stream() {
        return TransportError::NotAcceptable.into_response();
    }

    let handle = match state.sessions.create() {
        Ok(handle) => handle,
        Err(e) => return TransportError::Internal(e.to_string()).into_response(),
    };
    let id = handle.id().clone();

    let (writer, receiver): (StreamedChannel, _) = StreamedChannel::pair(
        state.transport_config.stream_channel_capacity,
        state.transport_config.write_timeout,
    );
    let endpoint_url = format!("{}?sessionId={}", state.transport_config.message_path, id);
    writer.send_endpoint(endpoint_url);

    state.streams.insert(id.to_string(), Arc::new(writer));
    let _ = handle.send(SessionCommand::StreamAttached).await;

    streamed_response(receiver, state.streams.clone(), id.to_string(), handle)
}
