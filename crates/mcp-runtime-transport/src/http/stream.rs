//! Shared plumbing for turning a [`StreamedChannel`]'s receiver half into
//! an HTTP event-stream response, used by both the 2025-profile `GET /mcp`
//! and the 2024-profile `GET /sse`.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use futures::{Stream, StreamExt};
use mcp_runtime_server::session::{SessionCommand, SessionHandle};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::channel::{encode_outbound_event, OutboundEvent, StreamedChannel};
use crate::sse::generate_event_id;

/// Build the `text/event-stream` response body for a registered streamed
/// connection, wired so that detachment is signaled to the session exactly
/// when the connection closes (the response body future is dropped).
#[must_use]
pub(crate) fn streamed_response(
    receiver: mpsc::Receiver<OutboundEvent>,
    streams: Arc<DashMap<String, Arc<StreamedChannel>>>,
    session_id: String,
    handle: SessionHandle,
) -> Response {
    let mut sequence: u64 = 0;
    let inner = ReceiverStream::new(receiver).map(move |event| {
        sequence += 1;
        Ok::<_, std::convert::Infallible>(Bytes::from(encode_outbound_event(
            &event,
            generate_event_id(sequence),
        )))
    });
    let guarded = GuardedStream { inner, _guard: StreamGuard { streams, id: session_id.clone(), handle } };

    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(guarded))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response());
    if let Ok(value) = HeaderValue::from_str(&session_id) {
        response.headers_mut().insert("Mcp-Session-Id", value);
    }
    response
}

struct GuardedStream<S> {
    inner: S,
    _guard: StreamGuard,
}

impl<S: Stream + Unpin> Stream for GuardedStream<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        Pin::new(&mut this.inner).poll_next(cx)
    }
}

struct StreamGuard {
    streams: Arc<DashMap<String, Arc<StreamedChannel>>>,
    id: String,
    handle: SessionHandle,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.streams.remove(&self.id);
        let handle = self.handle.clone();
        tokio::spawn(async move {
            let _ = handle.send(SessionCommand::StreamDetached).await;
        });
    }
}
