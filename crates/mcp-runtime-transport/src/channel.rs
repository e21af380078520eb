//! The event channel: a one-way sink from server to client for one
//! connection, in its two shapes (streamed, one-shot).

use std::sync::Mutex;
use std::time::Duration;

use mcp_runtime_server::session::ConnectionWriter;
use mcp_wire_protocol::jsonrpc::JsonRpcResponse;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::sse::{SseEncoder, SseEventBuilder};

/// One outbound item on a streamed connection's channel.
#[derive(Debug, Clone)]
pub enum OutboundEvent {
    /// A JSON-RPC response or server-initiated notification frame.
    Frame(JsonRpcResponse),
    /// A named SSE event with a pre-serialized payload, e.g. the `endpoint`
    /// event of the 2024 profile.
    Named {
        /// SSE event type.
        event: String,
        /// Pre-serialized payload.
        data: String,
    },
    /// A keepalive comment.
    Keepalive,
}

/// The server side of a streamed (long-lived SSE) connection's channel.
///
/// Bounded per §4.2 (ADDED): a full channel does not drop frames, it backs
/// the write off with a timeout equal to the request deadline so a stalled
/// client cannot block the dispatcher indefinitely.
pub struct StreamedChannel {
    sender: mpsc::Sender<OutboundEvent>,
    write_timeout: Duration,
}

impl StreamedChannel {
    /// Build a channel pair: the sender half implements [`ConnectionWriter`]
    /// and is handed to the session actor; the receiver half is consumed by
    /// the SSE response body.
    #[must_use]
    pub fn pair(capacity: usize, write_timeout: Duration) -> (Self, mpsc::Receiver<OutboundEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender, write_timeout }, receiver)
    }

    /// Send a named event, e.g. the 2024 profile's `endpoint` event
    /// carrying the message-post URL.
    pub fn send_endpoint(&self, url: impl Into<String>) {
        self.send_named("endpoint", url.into());
    }

    /// Send an arbitrary named event with a pre-serialized payload.
    pub fn send_named(&self, event: impl Into<String>, data: String) {
        self.dispatch(OutboundEvent::Named { event: event.into(), data });
    }

    /// Send a keepalive comment.
    pub fn send_keepalive(&self) {
        self.dispatch(OutboundEvent::Keepalive);
    }

    fn dispatch(&self, item: OutboundEvent) {
        let sender = self.sender.clone();
        let timeout = self.write_timeout;
        tokio::spawn(async move {
            if tokio::time::timeout(timeout, sender.send(item)).await.is_err() {
                warn!("streamed channel write timed out; connection is likely stalled");
            }
        });
    }

    /// Whether the receiver half has already been dropped (client
    /// disconnected).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl ConnectionWriter for StreamedChannel {
    fn write_response(&self, response: JsonRpcResponse) {
        self.dispatch(OutboundEvent::Frame(response));
    }
}

/// The server side of a one-shot connection's channel: exactly one
/// response or nothing (a notification gets no write at all, and the HTTP
/// layer answers 202 directly without waiting on this channel).
pub struct OneShotChannel {
    sender: Mutex<Option<oneshot::Sender<JsonRpcResponse>>>,
}

impl OneShotChannel {
    /// Build a channel pair: the sender half implements [`ConnectionWriter`]
    /// and is handed to the session actor; the receiver half is awaited by
    /// the HTTP handler to produce the response body.
    #[must_use]
    pub fn pair() -> (Self, oneshot::Receiver<JsonRpcResponse>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender: Mutex::new(Some(sender)) }, receiver)
    }
}

impl ConnectionWriter for OneShotChannel {
    fn write_response(&self, response: JsonRpcResponse) {
        if let Some(sender) = self.sender.lock().unwrap().take() {
            let _ = sender.send(response);
        } else {
            warn!("one-shot channel already consumed; dropping late response");
        }
    }
}

/// Encode one [`OutboundEvent`] to its SSE wire representation, assigning
/// it `event_id` as the resumption id.
#[must_use]
pub fn encode_outbound_event(event: &OutboundEvent, event_id: String) -> String {
    match event {
        OutboundEvent::Frame(response) => {
            let data = serde_json::to_string(response).unwrap_or_else(|_| "{}".to_string());
            SseEncoder::encode(&SseEventBuilder::new().id(event_id).data(data).build())
        }
        OutboundEvent::Named { event, data } => {
            SseEncoder::encode(&SseEventBuilder::new().id(event_id).event(event.clone()).data(data.clone()).build())
        }
        OutboundEvent::Keepalive => SseEncoder::encode_keepalive(),
    }
}

/// A connection writer for notifications, which the session actor never
/// writes a response to. Exists only so `SessionCommand::Inbound` always
/// has a concrete writer to hand over, regardless of message shape.
pub struct NullWriter;

impl ConnectionWriter for NullWriter {
    fn write_response(&self, _response: JsonRpcResponse) {
        warn!("a response was written for a notification; this is a dispatcher bug");
    }
}
