//! Session identity, state machine, pending-request bookkeeping, the actor
//! that serializes mutation of all three, the process-wide session map,
//! and idle-session passivation.

pub mod actor;
pub mod id;
pub mod pending;
pub mod reaper;
pub mod registry;
pub mod state;

pub use actor::{SessionCommand, SessionHandle};
pub use id::SessionId;
pub use pending::{ConnectionWriter, PendingTable};
pub use registry::SessionRegistry;
pub use state::{Session, SessionState};
