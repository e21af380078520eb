//! Shared plumbing for routing a parsed inbound frame through a session
//! actor and collecting whatever responses it produces, used by both the
//! 2025-profile `/mcp` endpoint and the 2024-profile `/messages` endpoint.

use std::sync::Arc;
use std::time::Duration;

use mcp_runtime_server::session::{ConnectionWriter, SessionCommand, SessionHandle};
use mcp_wire_core::ErrorCode;
use mcp_wire_protocol::jsonrpc::{InboundFrame, JsonRpcError, JsonRpcMessage, JsonRpcResponse};

use crate::channel::{NullWriter, OneShotChannel};

/// Send one message to `handle` and, for a request, wait up to `deadline`
/// for its response. Returns `None` for a notification — it never
/// produces a response frame.
pub(crate) async fn dispatch_one(
    handle: &SessionHandle,
    message: JsonRpcMessage,
    deadline: Duration,
) -> Option<JsonRpcResponse> {
    match message {
        JsonRpcMessage::Notification(_) => {
            let _ = handle
                .send(SessionCommand::Inbound { message, connection: Arc::new(NullWriter) })
                .await;
            None
        }
        JsonRpcMessage::Request(ref request) => {
            let id = request.id.clone();
            let (writer, receiver): (OneShotChannel, _) = OneShotChannel::pair();
            let connection: Arc<dyn ConnectionWriter> = Arc::new(writer);
            if handle
                .send(SessionCommand::Inbound { message, connection })
                .await
                .is_err()
            {
                return Some(JsonRpcResponse::error(
                    JsonRpcError::new(ErrorCode::InternalError, "session actor is gone"),
                    id,
                ));
            }
            match tokio::time::timeout(deadline, receiver).await {
                Ok(Ok(response)) => Some(response),
                _ => Some(JsonRpcResponse::error(
                    JsonRpcError::new(ErrorCode::InternalError, "request timed out"),
                    id,
                )),
            }
        }
    }
}

/// Dispatch every message of `frame` through `handle`, preserving order,
/// and return only the responses (notifications contribute nothing).
pub(crate) async fn dispatch_frame(
    handle: &SessionHandle,
    frame: InboundFrame,
    deadline: Duration,
) -> Vec<JsonRpcResponse> {
    match frame {
        InboundFrame::Single(message) => {
            dispatch_one(handle, message, deadline).await.into_iter().collect()
        }
        InboundFrame::Batch(messages) => {
            let mut responses = Vec::with_capacity(messages.len());
            for message in messages {
                if let Some(response) = dispatch_one(handle, message, deadline).await {
                    responses.push(response);
                }
            }
            responses
        }
    }
}

/// Whether `frame` is a single `initialize` request — the only shape
/// allowed to arrive without a resolvable session id (§4.6).
#[must_use]
pub(crate) fn is_sole_initialize(frame: &InboundFrame) -> bool {
    matches!(
        frame,
        InboundFrame::Single(JsonRpcMessage::Request(r)) if r.method == "initialize"
    )
}
