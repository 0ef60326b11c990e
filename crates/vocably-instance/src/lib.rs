//! At-most-one-running-instance coordination.
//!
//! The well-known IPC endpoint is a Unix domain socket; binding it is
//! the atomic name claim. A process that finds a live primary forwards
//! `ShowWindow` and defers. A process that loses the bind race retries
//! the forward once and otherwise runs as a second, degraded primary;
//! a duplicate window beats no window.

pub mod coordinator;
pub mod pid;
pub mod protocol;

pub use coordinator::{ClaimOutcome, InstanceEndpoint, PrimaryGuard, claim};
pub use protocol::{Command, send_command};

pub type InstanceResult<T> = Result<T, InstanceError>;

#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    #[error("no primary reachable: {0}")]
    Connect(std::io::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad ipc frame: {0}")]
    Frame(#[from] serde_json::Error),

    #[error("remote call timed out")]
    Timeout,
}
