//! Worker module: runs the engine on a dedicated thread behind
//! fire-and-forget command and event channels.

mod core;
mod types;

pub use core::SolverWorker;
pub use types::{Command, Event, Status, WorkerError};
