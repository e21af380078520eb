//! # mcp-wire-core
//!
//! Foundation layer for the MCP session/transport runtime: the polymorphic
//! request id, the standard JSON-RPC error code taxonomy, and a minimal
//! per-request context that higher layers enrich.
//!
//! ## Module organization
//!
//! - [`id`]: `RequestId` (int/string) and `ResponseId` (the id-or-null wire
//!   shape used on responses, including parse errors).
//! - [`error`]: `ErrorCode` and the `WireError` object carried on JSON-RPC
//!   error responses.
//! - [`context`]: `RequestContext`, the bag of ambient per-request data
//!   (session id, deadline, opaque auth principal) threaded through dispatch.

pub mod context;
pub mod error;
pub mod id;

pub use context::RequestContext;
pub use error::{ErrorCode, WireError};
pub use id::{RequestId, ResponseId};

/// Protocol version strings this runtime understands.
pub mod protocol_version {
    /// The 2024-11-05 wire profile: persistent SSE stream + POST messages.
    pub const V2024_11_05: &str = "2024-11-05";
    /// The 2025-03-26 wire profile: stateless POST, optional paired SSE stream.
    pub const V2025_03_26: &str = "2025-03-26";

    /// All versions the server can negotiate, newest first.
    pub const SUPPORTED: &[&str] = &[V2025_03_26, V2024_11_05];

    /// Pick the highest supported version that is `<=` the client's request,
    /// per the ordering in [`SUPPORTED`]. Returns `None` if nothing overlaps.
    #[must_use]
    pub fn negotiate(requested: &str) -> Option<&'static str> {
        if requested == "auto" {
            // "auto" is a client-side-only token; the server must never
            // pick it and must never emit it. Treat it as no preference
            // and hand back our most current profile.
            return SUPPORTED.first().copied();
        }
        // Version strings are fixed-width ISO dates, so lexicographic order
        // matches chronological order and `SUPPORTED` (newest first) can be
        // scanned for the first entry that does not exceed the request.
        SUPPORTED.iter().find(|&&v| v <= requested).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::protocol_version::*;

    #[test]
    fn negotiate_exact_match() {
        assert_eq!(negotiate("2024-11-05"), Some("2024-11-05"));
        assert_eq!(negotiate("2025-03-26"), Some("2025-03-26"));
    }

    #[test]
    fn negotiate_rejects_version_older_than_everything_supported() {
        assert_eq!(negotiate("2020-01-01"), None);
    }

    #[test]
    fn negotiate_picks_highest_supported_not_exceeding_the_request() {
        assert_eq!(negotiate("2025-07-01"), Some("2025-03-26"));
    }

    #[test]
    fn negotiate_auto_is_never_returned() {
        let picked = negotiate("auto").unwrap();
        assert_ne!(picked, "auto");
        assert!(SUPPORTED.contains(&picked));
    }
}
