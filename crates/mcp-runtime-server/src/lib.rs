//! # mcp-runtime-server
//!
//! The session state machine, pending-request bookkeeping, and the
//! pluggable executor chain for an MCP server runtime. No transport: this
//! crate is driven by whatever HTTP (or other) surface hands it parsed
//! [`mcp_wire_protocol::jsonrpc::JsonRpcMessage`]s and a
//! [`session::ConnectionWriter`] to answer on.
//!
//! ## Module organization
//!
//! - [`session`]: session identity, the `fresh -> initializing -> ready ->
//!   closing -> terminated` state machine, pending-request bookkeeping, the
//!   single-threaded session actor, the process-wide session map, and idle
//!   passivation.
//! - [`dispatch`]: the pluggable feature-executor chain (tools, prompts,
//!   resources, utilities, custom) and the content envelope rules for
//!   `tools/call`.
//! - [`registry`]: external-collaborator traits an embedding binary
//!   implements to supply tools/prompts/resources.
//! - [`config`]: typed, env-overlaid server configuration.
//! - [`error`]: the server-layer error taxonomy.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod session;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
