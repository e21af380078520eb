//! The session actor: a single-threaded owner of one session's state,
//! pending-request table, and dispatch core, driven by a command mailbox.
//!
//! Dispatch itself runs off the mailbox (spawned onto the runtime's thread
//! pool) so a slow executor cannot block the actor from draining other
//! connections' attach/detach traffic or a concurrent request's bookkeeping
//! — only the cheap, synchronous state mutations happen inline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use mcp_wire_core::{RequestContext, RequestId};
use mcp_wire_protocol::jsonrpc::{JsonRpcError, JsonRpcMessage, JsonRpcResponse};
use mcp_wire_protocol::types::initialize::InitializeRequest;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::dispatch::DispatchCore;
use crate::error::ServerError;
use crate::session::id::SessionId;
use crate::session::pending::{ConnectionWriter, PendingTable};
use crate::session::state::Session;

/// Commands a session actor's mailbox accepts.
pub enum SessionCommand {
    /// An inbound request or notification to dispatch.
    Inbound {
        /// The parsed message.
        message: JsonRpcMessage,
        /// The connection the response (if any) should be written to.
        connection: Arc<dyn ConnectionWriter>,
    },
    /// A streamed connection attached to this session.
    StreamAttached,
    /// A streamed connection detached from this session.
    StreamDetached,
    /// The connection's bookkeeping entries should be forgotten without
    /// writing a response, because the connection closed.
    ConnectionClosed {
        /// The connection that closed.
        connection: Arc<dyn ConnectionWriter>,
    },
    /// Internal: an off-mailbox dispatch has finished.
    DispatchComplete {
        /// The request id the dispatch was for.
        id: RequestId,
        /// The dispatched method, for the notification special-case and
        /// for logging.
        method: String,
        /// The raw executor result, or the wire error to send instead.
        outcome: Result<serde_json::Value, JsonRpcError>,
    },
    /// Whether the session's idle timer has elapsed; the reaper uses this
    /// to decide whether to destroy the session.
    CheckIdle {
        /// The configured idle timeout.
        idle_timeout: Duration,
        /// Where to send the answer.
        respond_to: oneshot::Sender<bool>,
    },
    /// Begin graceful shutdown and then terminate.
    Shutdown,
}

/// A cheap, cloneable reference to a running session actor's mailbox.
#[derive(Clone)]
pub struct SessionHandle {
    id: SessionId,
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// The session id this handle addresses.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Enqueue a command. Fails only if the actor has already stopped.
    pub async fn send(&self, command: SessionCommand) -> Result<(), ServerError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| ServerError::UnknownSession(self.id.to_string()))
    }
}

/// Spawn a new session actor and return a handle to it.
///
/// `server_capabilities` is fixed at construction per the data model; the
/// actor owns everything else about the session's lifetime.
#[must_use]
pub fn spawn(
    id: SessionId,
    server_capabilities: mcp_wire_protocol::capabilities::ServerCapabilities,
    dispatch: Arc<DispatchCore>,
    mailbox_capacity: usize,
) -> SessionHandle {
    let (sender, receiver) = mpsc::channel(mailbox_capacity);
    let handle = SessionHandle { id: id.clone(), sender: sender.clone() };
    let actor = SessionActor {
        id,
        session: Session::new(server_capabilities),
        pending: PendingTable::new(),
        dispatch,
        self_sender: sender,
    };
    tokio::spawn(actor.run(receiver));
    handle
}

struct SessionActor {
    id: SessionId,
    session: Session,
    pending: PendingTable,
    dispatch: Arc<DispatchCore>,
    self_sender: mpsc::Sender<SessionCommand>,
}

impl SessionActor {
    async fn run(mut self, mut mailbox: mpsc::Receiver<SessionCommand>) {
        while let Some(command) = mailbox.recv().await {
            match command {
                SessionCommand::Inbound { message, connection } => {
                    self.handle_inbound(message, connection);
                }
                SessionCommand::StreamAttached => {
                    self.session.attach_streamed();
                }
                SessionCommand::StreamDetached => {
                    self.session.detach_streamed();
                }
                SessionCommand::ConnectionClosed { connection } => {
                    self.pending.discard_for_connection(&connection);
                }
                SessionCommand::DispatchComplete { id, method, outcome } => {
                    self.handle_dispatch_complete(id, &method, outcome);
                }
                SessionCommand::CheckIdle { idle_timeout, respond_to } => {
                    let _ = respond_to.send(self.session.is_idle_expired(idle_timeout));
                }
                SessionCommand::Shutdown => {
                    self.session.begin_closing();
                    self.session.terminate();
                    break;
                }
            }
        }
        debug!(session_id = %self.id, stopped_at = %chrono::Utc::now(), "session actor stopped");
    }

    #[tracing::instrument(skip(self, message, connection), fields(session_id = %self.id, method = %message.method()))]
    fn handle_inbound(&mut self, message: JsonRpcMessage, connection: Arc<dyn ConnectionWriter>) {
        self.session.touch();
        let method = message.method().to_string();

        if !self.session.accepts(&method) {
            let error = ServerError::InvalidStateTransition {
                method: method.clone(),
                state: self.session.state.name(),
            };
            warn!(session_id = %self.id, %method, state = self.session.state.name(), "rejected: invalid state transition");
            if let JsonRpcMessage::Request(request) = message {
                connection.write_response(JsonRpcResponse::error((&error).into(), request.id));
            }
            return;
        }

        match &message {
            JsonRpcMessage::Notification(n) if n.method == "notifications/initialized" => {
                if let Err(e) = self.session.mark_initialized() {
                    warn!(session_id = %self.id, error = %e, "initialized notification rejected");
                }
                return;
            }
            _ => {}
        }

        if method == "initialize" {
            if let JsonRpcMessage::Request(request) = message {
                self.handle_initialize(request, connection);
            }
            return;
        }

        match message {
            JsonRpcMessage::Request(request) => {
                let deadline = Instant::now() + Duration::from_secs(30);
                if let Err(e) = self.pending.insert(request.id.clone(), connection.clone(), deadline) {
                    warn!(session_id = %self.id, %method, "duplicate request id");
                    connection.write_response(JsonRpcResponse::error((&e).into(), request.id));
                    return;
                }
                self.spawn_dispatch(request.id, method, request.params);
            }
            JsonRpcMessage::Notification(notification) => {
                self.spawn_fire_and_forget(notification.method, notification.params);
            }
        }
    }

    fn handle_initialize(&mut self, request: mcp_wire_protocol::jsonrpc::JsonRpcRequest, connection: Arc<dyn ConnectionWriter>) {
        let parsed: Result<InitializeRequest, _> =
            serde_json::from_value(request.params.clone().unwrap_or(serde_json::Value::Null));
        let parsed = match parsed {
            Ok(p) => p,
            Err(e) => {
                let error = ServerError::Protocol(mcp_wire_protocol::Error::InvalidParams(e.to_string()));
                connection.write_response(JsonRpcResponse::error((&error).into(), request.id));
                return;
            }
        };

        match self.session.initialize(&parsed.protocol_version, parsed.capabilities) {
            Ok(negotiated) => {
                let result = mcp_wire_protocol::types::InitializeResult {
                    protocol_version: negotiated.to_string(),
                    capabilities: self.session.server_capabilities.clone(),
                    server_info: mcp_wire_protocol::types::Implementation {
                        name: "mcp-runtime-server".to_string(),
                        version: env!("CARGO_PKG_VERSION").to_string(),
                    },
                    instructions: None,
                    session_id: self.id.to_string(),
                    meta: None,
                };
                let value = serde_json::to_value(result).unwrap_or(serde_json::Value::Null);
                connection.write_response(JsonRpcResponse::success(value, request.id));
            }
            Err(e) => {
                connection.write_response(JsonRpcResponse::error((&e).into(), request.id));
            }
        }
    }

    #[tracing::instrument(skip(self, params), fields(session_id = %self.id, %method))]
    fn spawn_dispatch(&self, id: RequestId, method: String, params: Option<serde_json::Value>) {
        use tracing::Instrument;

        let dispatch = self.dispatch.clone();
        let self_sender = self.self_sender.clone();
        let session_id = self.id.clone();
        let ctx = RequestContext::new(method.clone(), Some(id.clone())).with_session(session_id.to_string());
        let span = tracing::Span::current();
        tokio::spawn(
            async move {
                let outcome = dispatch
                    .dispatch(&ctx, &method, params)
                    .map_err(|e| JsonRpcError::from(&e));
                let _ = self_sender
                    .send(SessionCommand::DispatchComplete { id, method, outcome })
                    .await;
            }
            .instrument(span),
        );
    }

    fn spawn_fire_and_forget(&self, method: String, params: Option<serde_json::Value>) {
        let dispatch = self.dispatch.clone();
        let session_id = self.id.clone();
        let ctx = RequestContext::new(method.clone(), None).with_session(session_id.to_string());
        tokio::spawn(async move {
            if let Err(e) = dispatch.dispatch(&ctx, &method, params) {
                warn!(session_id = %session_id, %method, error = %e, "notification dispatch failed");
            }
        });
    }

    fn handle_dispatch_complete(
        &mut self,
        id: RequestId,
        method: &str,
        outcome: Result<serde_json::Value, JsonRpcError>,
    ) {
        let Some(connection) = self.pending.take(&id) else {
            debug!(session_id = %self.id, %method, "dispatch completed for an already-closed connection");
            return;
        };
        let response = match outcome {
            Ok(value) => JsonRpcResponse::success(value, id),
            Err(error) => JsonRpcResponse::error(error, id),
        };
        connection.write_response(response);
    }
}
