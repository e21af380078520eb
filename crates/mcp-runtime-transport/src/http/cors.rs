//! CORS policy for the MCP HTTP surface.
//!
//! Permissive by default (any origin, the methods and headers the two wire
//! profiles actually use) since the protocol itself carries no origin-based
//! authorization — an embedding binary layering auth in front of this
//! crate is expected to also narrow CORS if it needs to.

use axum::http::{HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer shared by every route.
#[must_use]
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("mcp-session-id"),
            HeaderName::from_static("last-event-id"),
            HeaderName::from_static("accept"),
        ])
        .expose_headers([HeaderName::from_static("mcp-session-id")])
}
