//! The Axum HTTP surface: shared state, session-id extraction, `Accept`
//! negotiation, and the router wiring the three paths from §4.6 together.

pub(crate) mod dispatch;
pub mod mcp_path;
pub mod message_path;
pub mod sse_path;
pub(crate) mod stream;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderMap};
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::CookieJar;
use dashmap::DashMap;
use mcp_runtime_server::session::SessionRegistry;
use mcp_runtime_server::ServerConfig;
use mcp_wire_protocol::capabilities::ServerCapabilities;
use serde::Deserialize;

use crate::channel::StreamedChannel;
use crate::http::cookie::SESSION_COOKIE_NAME;

pub mod cookie;
pub mod cors;

/// Configuration for the HTTP surface itself: paths, and whether the
/// 2024-11-05 backward-compat routes (`/sse`, `/messages`) are mounted.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// The single 2025-03-26 profile endpoint.
    pub mcp_path: String,
    /// The 2024-11-05 profile's event-stream endpoint.
    pub sse_path: String,
    /// The 2024-11-05 profile's message-post endpoint.
    pub message_path: String,
    /// Whether `sse_path`/`message_path` are mounted at all.
    pub enable_legacy_sse: bool,
    /// How long a streamed write may block before it is considered stalled.
    pub write_timeout: Duration,
    /// Bound on each streamed connection's outbound event channel.
    pub stream_channel_capacity: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            mcp_path: "/mcp".to_string(),
            sse_path: "/sse".to_string(),
            message_path: "/messages".to_string(),
            enable_legacy_sse: true,
            write_timeout: Duration::from_secs(30),
            stream_channel_capacity: 256,
        }
    }
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide session map.
    pub sessions: Arc<SessionRegistry>,
    /// This server's fixed capability advertisement, echoed on `initialize`.
    pub server_capabilities: ServerCapabilities,
    /// Ambient server configuration (timeouts, limits).
    pub server_config: ServerConfig,
    /// HTTP-specific configuration.
    pub transport_config: TransportConfig,
    /// Session id -> the streamed connection currently attached to it, if
    /// any GET request opened one. A POST whose `Accept` prefers
    /// `text/event-stream` and finds an entry here dispatches onto that
    /// stream instead of waiting on the request's own connection.
    pub streams: Arc<DashMap<String, Arc<StreamedChannel>>>,
}

impl AppState {
    /// Build a fresh `AppState`.
    #[must_use]
    pub fn new(
        sessions: Arc<SessionRegistry>,
        server_capabilities: ServerCapabilities,
        server_config: ServerConfig,
        transport_config: TransportConfig,
    ) -> Self {
        Self {
            sessions,
            server_capabilities,
            server_config,
            transport_config,
            streams: Arc::new(DashMap::new()),
        }
    }
}

/// Build the Axum router for the given state, mounting the legacy
/// `/sse`+`/messages` pair only when `transport_config.enable_legacy_sse`.
#[must_use]
pub fn router(state: AppState) -> Router {
    let legacy = state.transport_config.enable_legacy_sse;
    let mcp_path = state.transport_config.mcp_path.clone();
    let sse_path = state.transport_config.sse_path.clone();
    let message_path = state.transport_config.message_path.clone();

    let mut router = Router::new().route(
        &mcp_path,
        get(mcp_path::get_handler).post(mcp_path::post_handler),
    );
    if legacy {
        router = router
            .route(&sse_path, get(sse_path::get_handler))
            .route(&message_path, post(message_path::post_handler));
    }
    router.layer(cors::layer()).with_state(state)
}

/// Compliance mode inferred from a request's `Accept` header, mirroring the
/// negotiation a 2025-03-26-profile client is expected to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptMode {
    /// Accepts both `application/json` and `text/event-stream`: the server
    /// may choose either response shape.
    Compliant,
    /// Accepts only JSON; the server must answer with a JSON body.
    JsonOnly,
    /// Accepts only an event stream.
    SseOnly,
    /// Neither shape is acceptable to the client.
    Invalid,
}

impl AcceptMode {
    /// Whether this mode permits an event-stream response.
    #[must_use]
    pub fn allows_stream(self) -> bool {
        matches!(self, Self::Compliant | Self::SseOnly)
    }
}

/// Parse an `Accept` header value into a compliance mode. A missing or
/// empty header is treated as `*/*` (JSON-capable), matching how most HTTP
/// clients behave when they don't set the header at all.
#[must_use]
pub fn parse_accept_header(value: &str) -> AcceptMode {
    let trimmed = value.trim();
    let accepts_json =
        trimmed.is_empty() || trimmed.contains("application/json") || trimmed.contains("*/*");
    let accepts_sse = trimmed.contains("text/event-stream");
    match (accepts_json, accepts_sse) {
        (true, true) => AcceptMode::Compliant,
        (true, false) => AcceptMode::JsonOnly,
        (false, true) => AcceptMode::SseOnly,
        (false, false) => AcceptMode::Invalid,
    }
}

/// Query-string shape accepted on the 2024-profile routes, where a session
/// id may legitimately travel as `?sessionId=...`.
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(rename = "sessionId", alias = "session")]
    session_id: Option<String>,
}

/// Extract the session id per §4.6's order: `Mcp-Session-Id` header, then
/// the `mcp_session_id` cookie, then (only when `allow_query` is set, i.e.
/// only on the 2024-profile routes) a query parameter.
#[must_use]
pub fn extract_session_id(
    headers: &HeaderMap,
    jar: &CookieJar,
    query: Option<&SessionQuery>,
    allow_query: bool,
) -> Option<String> {
    if let Some(value) = headers.get("Mcp-Session-Id").and_then(|v| v.to_str().ok()) {
        return Some(value.to_string());
    }
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        return Some(cookie.value().to_string());
    }
    if allow_query {
        if let Some(id) = query.and_then(|q| q.session_id.clone()) {
            return Some(id);
        }
    }
    None
}

/// Read the `Accept` header out of a `HeaderMap`, defaulting to `*/*`.
#[must_use]
pub fn accept_mode(headers: &HeaderMap) -> AcceptMode {
    let value = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("*/*");
    parse_accept_header(value)
}
