use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::unix::OwnedWriteHalf;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{broadcast, mpsc, oneshot};

use tagwm_ipc::{StateEvent, SubscribeRequest};

use super::EVENT_SOCKET_PATH;

type SnapshotSender = mpsc::Sender<oneshot::Sender<StateEvent>>;

/// Streams state events to subscribers, one JSON object per line.
pub struct EventServer {
    socket_path: PathBuf,
    listener: UnixListener,
    event_rx: broadcast::Receiver<StateEvent>,
    snapshot_tx: SnapshotSender,
}

impl EventServer {
    pub fn bind(event_rx: broadcast::Receiver<StateEvent>, snapshot_tx: SnapshotSender) -> Result<Self> {
        let socket_path = PathBuf::from(EVENT_SOCKET_PATH);
        if socket_path.exists() {
            std::fs::remove_file(&socket_path)
                .with_context(|| format!("Failed to remove stale socket {:?}", socket_path))?;
        }

        let listener = UnixListener::bind(&socket_path)
            .with_context(|| format!("Failed to bind {:?}", socket_path))?;
        tracing::info!("Event server listening on {:?}", socket_path);

        Ok(Self {
            socket_path,
            listener,
            event_rx,
            snapshot_tx,
        })
    }

    pub async fn run(self) -> Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, _addr)) => {
                    let event_rx = self.event_rx.resubscribe();
                    let snapshot_tx = self.snapshot_tx.clone();
                    tokio::spawn(async move {
                        if let Err(e) = Self::handle_connection(stream, event_rx, snapshot_tx).await
                        {
                            tracing::debug!("Event subscriber disconnected: {}", e);
                        }
                    });
                }
                Err(e) => {
                    tracing::error!("Event server accept error: {}", e);
                }
            }
        }
    }

    async fn handle_connection(
        stream: UnixStream,
        mut event_rx: broadcast::Receiver<StateEvent>,
        snapshot_tx: SnapshotSender,
    ) -> Result<()> {
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);
        let mut line = String::new();

        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            return Ok(());
        }

        let request: SubscribeRequest = serde_json::from_str(line.trim()).unwrap_or_default();
        let filter = request.effective_filter();
        tracing::debug!("New event subscriber with filter: {:?}", filter);

        if request.snapshot {
            let (resp_tx, resp_rx) = oneshot::channel();
            if snapshot_tx.send(resp_tx).await.is_ok() {
                if let Ok(snapshot) = resp_rx.await {
                    write_event(&mut writer, &snapshot).await?;
                }
            }
        }

        loop {
            match event_rx.recv().await {
                Ok(event) => {
                    if filter.matches(&event) {
                        write_event(&mut writer, &event).await?;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Event subscriber lagged by {} messages", n);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }

        Ok(())
    }
}

async fn write_event(writer: &mut OwnedWriteHalf, event: &StateEvent) -> Result<()> {
    let json = serde_json::to_string(event)?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

impl Drop for EventServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

/// Sender side of the broadcast channel feeding every subscriber.
#[derive(Clone)]
pub struct EventBroadcaster {
    event_tx: broadcast::Sender<StateEvent>,
}

impl EventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity);
        Self { event_tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.event_tx.subscribe()
    }

    pub fn send(&self, event: StateEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}
