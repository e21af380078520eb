//! Idle-session passivation: periodically asks each session whether its
//! idle timer has elapsed and, if so, shuts it down and forgets it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, error};

use crate::session::actor::SessionCommand;
use crate::session::registry::SessionRegistry;

/// Sweep interval: finer than the default idle timeout so an idle session
/// is reaped within a bounded window of crossing its deadline.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(10);

/// Run the reaper loop until `shutdown` resolves. Intended to be spawned
/// once per process alongside the session registry.
pub async fn run(registry: Arc<SessionRegistry>, idle_timeout: Duration, mut shutdown: tokio::sync::watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                sweep_once(&registry, idle_timeout).await;
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    debug!("idle reaper stopping");
                    return;
                }
            }
        }
    }
}

async fn sweep_once(registry: &SessionRegistry, idle_timeout: Duration) {
    for id in registry.ids() {
        let Some(handle) = registry.get(&id) else { continue };
        let (tx, rx) = oneshot::channel();
        if handle
            .send(SessionCommand::CheckIdle { idle_timeout, respond_to: tx })
            .await
            .is_err()
        {
            // Actor already gone; drop the stale entry.
            registry.remove(&id);
            continue;
        }
        match rx.await {
            Ok(true) => {
                debug!(session_id = %id, "reaping idle session");
                let _ = handle.send(SessionCommand::Shutdown).await;
                registry.remove(&id);
            }
            Ok(false) => {}
            Err(_) => error!(session_id = %id, "idle check dropped without an answer"),
        }
    }
}
