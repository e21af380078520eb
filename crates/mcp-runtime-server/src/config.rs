//! Typed server configuration, with an env-var overlay via the `config`
//! crate (`MCP_*` prefix), matching the teacher's layered-configuration
//! convention.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ServerResult;

/// Default request deadline if none is configured (§5).
pub const DEFAULT_REQUEST_DEADLINE_SECS: u64 = 30;
/// Default idle timeout for a session with no attached connections (§4.4).
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;
/// Default cap on concurrent sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;
/// Default cap on a single JSON-RPC message body, in bytes.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 10 * 1024 * 1024;
/// Default bound on a connection's outbound event channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Per-request and per-session timing.
    pub timeouts: TimeoutConfig,
    /// Resource ceilings.
    pub limits: LimitsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            timeouts: TimeoutConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

/// Timing knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Seconds a dispatched request may run before its pending entry
    /// expires with an internal-error response.
    pub request_deadline_secs: u64,
    /// Seconds a session may sit with zero attached connections before it
    /// is destroyed. Paused while any streamed connection is attached.
    pub idle_timeout_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_deadline_secs: DEFAULT_REQUEST_DEADLINE_SECS,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
        }
    }
}

impl TimeoutConfig {
    /// The request deadline as a `Duration`.
    #[must_use]
    pub fn request_deadline(&self) -> Duration {
        Duration::from_secs(self.request_deadline_secs)
    }

    /// The idle timeout as a `Duration`.
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

/// Resource ceilings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum number of concurrently live sessions.
    pub max_sessions: usize,
    /// Maximum size, in bytes, of a single inbound JSON-RPC message body.
    pub max_message_size: usize,
    /// Bound on each connection's outbound event channel.
    pub channel_capacity: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Defaults, overlaid with `MCP_*` environment variables (e.g.
    /// `MCP_TIMEOUTS__IDLE_TIMEOUT_SECS=60`).
    ///
    /// # Errors
    ///
    /// Returns an error if an overlay value fails to deserialize into the
    /// shape above.
    pub fn load() -> ServerResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(
                config::Environment::with_prefix("MCP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_documented_constants() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.timeouts.request_deadline_secs, 30);
        assert_eq!(cfg.timeouts.idle_timeout_secs, 300);
        assert_eq!(cfg.limits.max_message_size, 10 * 1024 * 1024);
    }

    #[test]
    fn request_deadline_converts_to_duration() {
        let cfg = TimeoutConfig::default();
        assert_eq!(cfg.request_deadline(), Duration::from_secs(30));
    }
}
