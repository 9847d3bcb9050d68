use std::fmt;

use thiserror::Error;

use crate::engine::{Options, Snapshot};

/// Commands accepted by the worker, processed in arrival order. A command
/// received mid-batch takes effect at the next yield boundary.
#[derive(Debug, Clone)]
pub enum Command {
    Start(Options),
    Pause,
    Resume,
    Stop,
}

/// Lifecycle states reported on the event channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Paused,
    Done,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Status::Idle => "idle",
            Status::Running => "running",
            Status::Paused => "paused",
            Status::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Events emitted by the worker.
#[derive(Debug, Clone)]
pub enum Event {
    Status(Status),
    /// Human-readable progress text for a log or console display.
    Message(String),
    /// Discard accumulated messages; sent once per `start`.
    ClearMessages,
    Snapshot(Snapshot),
}

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("worker thread is no longer running")]
    Disconnected,
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}
