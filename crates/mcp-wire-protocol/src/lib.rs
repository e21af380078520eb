//! # mcp-wire-protocol
//!
//! JSON-RPC 2.0 framing and the MCP wire types layered on top of
//! `mcp-wire-core`'s polymorphic id and error code.
//!
//! ## Module organization
//!
//! - [`jsonrpc`]: request/response/notification/batch framing, parsing and
//!   serialization.
//! - [`error`]: `Error`, the protocol-layer error type, and its mapping onto
//!   JSON-RPC error codes.
//! - [`capabilities`]: client/server capability advertisement shapes.
//! - [`content`]: the content envelope (`{content, isError}`) used for tool
//!   call results, and its content-block variants.
//! - [`types`]: initialize handshake types and the tool/prompt/resource
//!   descriptors and request/result shapes.

pub mod capabilities;
pub mod content;
pub mod error;
pub mod jsonrpc;
pub mod types;

pub use error::{Error, Result};
pub use jsonrpc::{
    JsonRpcError, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    JsonRpcResponsePayload, JsonRpcVersion, JSONRPC_VERSION,
};
pub use mcp_wire_core::{RequestId, ResponseId};
