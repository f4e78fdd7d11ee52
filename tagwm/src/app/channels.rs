use std::sync::mpsc as std_mpsc;
use std::time::Duration;

use anyhow::Result;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::MissedTickBehavior;

use crate::event::LoopEvent;
use crate::ipc::{EventBroadcaster, EventServer, IpcServer};
use tagwm_ipc::{Command, Response, StateEvent};

pub type IpcCommandWithResponse = (Command, mpsc::Sender<Response>);

pub type SnapshotRequest = oneshot::Sender<StateEvent>;

/// Channel ends the socket servers are built from.
pub struct ServerEnds {
    pub cmd_tx: mpsc::Sender<IpcCommandWithResponse>,
    pub event_rx: broadcast::Receiver<StateEvent>,
    pub snapshot_tx: mpsc::Sender<SnapshotRequest>,
}

pub struct Servers {
    pub ipc: IpcServer,
    pub events: EventServer,
}

impl ServerEnds {
    /// Bind both sockets. Must run inside the tokio runtime context.
    pub fn bind(self) -> Result<Servers> {
        Ok(Servers {
            ipc: IpcServer::bind(self.cmd_tx)?,
            events: EventServer::bind(self.event_rx, self.snapshot_tx)?,
        })
    }
}

pub struct TokioChannels {
    pub loop_tx: std_mpsc::Sender<LoopEvent>,
    pub ipc_rx: mpsc::Receiver<IpcCommandWithResponse>,
    pub snapshot_rx: mpsc::Receiver<SnapshotRequest>,
    pub broadcaster: EventBroadcaster,
    pub state_event_rx: std_mpsc::Receiver<StateEvent>,
    pub tick_interval: Duration,
}

pub struct MainChannels {
    pub loop_rx: std_mpsc::Receiver<LoopEvent>,
    pub state_event_tx: std_mpsc::Sender<StateEvent>,
}

pub fn create_channels(tick_interval: Duration) -> (TokioChannels, MainChannels, ServerEnds) {
    // tokio -> main thread
    let (loop_tx, loop_rx) = std_mpsc::channel::<LoopEvent>();

    // IPC server -> relay (tokio internal)
    let (cmd_tx, ipc_rx) = mpsc::channel::<IpcCommandWithResponse>(256);

    // Event broadcasting for state streaming
    let broadcaster = EventBroadcaster::new(256);
    let event_rx = broadcaster.subscribe();

    // main thread -> broadcaster
    let (state_event_tx, state_event_rx) = std_mpsc::channel::<StateEvent>();

    // event server -> relay
    let (snapshot_tx, snapshot_rx) = mpsc::channel::<SnapshotRequest>(16);

    (
        TokioChannels {
            loop_tx,
            ipc_rx,
            snapshot_rx,
            broadcaster,
            state_event_rx,
            tick_interval,
        },
        MainChannels {
            loop_rx,
            state_event_tx,
        },
        ServerEnds {
            cmd_tx,
            event_rx,
            snapshot_tx,
        },
    )
}

pub async fn run_async(channels: TokioChannels, servers: Servers) -> Result<()> {
    let TokioChannels {
        loop_tx,
        mut ipc_rx,
        mut snapshot_rx,
        broadcaster,
        state_event_rx,
        tick_interval,
    } = channels;
    let Servers {
        ipc: ipc_server,
        events: event_server,
    } = servers;

    tracing::info!("Tokio runtime started");

    tokio::spawn(async move {
        if let Err(e) = ipc_server.run().await {
            tracing::error!("IPC server error: {}", e);
        }
    });

    tokio::spawn(async move {
        if let Err(e) = event_server.run().await {
            tracing::error!("Event server error: {}", e);
        }
    });

    // Forward state events from the main thread to the broadcast channel
    std::thread::spawn(move || {
        while let Ok(event) = state_event_rx.recv() {
            broadcaster.send(event);
        }
    });

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut tick = tokio::time::interval(tick_interval);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let event = tokio::select! {
            Some((cmd, resp_tx)) = ipc_rx.recv() => LoopEvent::Ipc(cmd, resp_tx),
            Some(request) = snapshot_rx.recv() => LoopEvent::Snapshot(request),
            _ = tick.tick() => LoopEvent::Tick,
            _ = sigint.recv() => LoopEvent::Shutdown,
            _ = sigterm.recv() => LoopEvent::Shutdown,
        };

        let shutdown = matches!(event, LoopEvent::Shutdown);
        if shutdown {
            tracing::info!("Termination signal received");
        }
        if loop_tx.send(event).is_err() {
            tracing::debug!("Main loop is gone");
            break;
        }
        if shutdown {
            break;
        }
    }

    tracing::info!("Tokio runtime exiting");
    Ok(())
}
