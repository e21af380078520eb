//! The HTTP-facing half of the runtime: the Axum dispatcher for both wire
//! profiles, the SSE codec, and the event-channel abstraction a session
//! actor writes through without knowing which profile is on the other end.

pub mod channel;
pub mod error;
pub mod http;
pub mod logging;
pub mod sse;

pub use error::TransportError;
pub use http::{router, AppState, TransportConfig};
