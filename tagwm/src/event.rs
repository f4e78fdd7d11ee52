use tokio::sync::{mpsc, oneshot};

use tagwm_ipc::{Command, Response, StateEvent};

/// Everything the main loop reacts to, delivered from the tokio thread.
#[derive(Debug)]
pub enum LoopEvent {
    /// A command from an IPC client and where to send its response
    Ipc(Command, mpsc::Sender<Response>),
    /// A new event subscriber asked for the current state
    Snapshot(oneshot::Sender<StateEvent>),
    /// Periodic housekeeping
    Tick,
    /// SIGINT or SIGTERM
    Shutdown,
}
