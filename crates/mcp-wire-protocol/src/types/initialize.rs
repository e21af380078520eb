//! The `initialize` handshake: request, result, and the `initialized`
//! notification that follows it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::capabilities::{ClientCapabilities, ServerCapabilities};

/// Name and version of a client or server implementation, exchanged during
/// the handshake for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Implementation {
    /// Implementation name.
    pub name: String,
    /// Implementation version string.
    pub version: String,
}

/// The `initialize` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeRequest {
    /// The protocol version the client wishes to use.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// What the client supports.
    pub capabilities: ClientCapabilities,
    /// Client name/version.
    #[serde(rename = "clientInfo")]
    pub client_info: Implementation,
    /// Opaque passthrough metadata.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// The `initialize` result body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    /// The protocol version the server has chosen, after negotiation.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// What the server supports.
    pub capabilities: ServerCapabilities,
    /// Server name/version.
    #[serde(rename = "serverInfo")]
    pub server_info: Implementation,
    /// Free-form usage instructions shown to the client/user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// The id of the session this handshake established. Present on every
    /// successful `initialize` result; its absence on the wire indicates an
    /// initialize failure.
    #[serde(rename = "sessionId")]
    pub session_id: String,
    /// Opaque passthrough metadata.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// The `notifications/initialized` notification body. Carries no fields;
/// its arrival is what moves a session from `initializing` to `ready`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitializedNotification {}
