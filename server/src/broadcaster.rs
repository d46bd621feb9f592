//! Snapshot broadcaster and the WebSocket push channel.
//!
//! Every tick the snapshot is encoded once as an `arena_state`
//! [`PushEvent`] and published on a bounded broadcast channel. Publishing
//! never waits for observers: with no observers the frame is dropped, and
//! an observer that falls behind skips ahead to the newest frames. A
//! failed send only ends that observer's task.

use crate::network::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use log::{debug, error, info, warn};
use shared::{ArenaState, PushEvent};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

#[derive(Debug, Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<String>,
}

impl Broadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    /// Publishes a full snapshot to every connected observer.
    ///
    /// Returns how many observers the frame was queued for. Zero observers
    /// is not an error.
    pub fn publish(&self, snapshot: &ArenaState) -> usize {
        match encode_frame(snapshot) {
            Ok(frame) => self.tx.send(frame).unwrap_or(0),
            Err(e) => {
                error!("Failed to encode arena snapshot: {}", e);
                0
            }
        }
    }

    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

pub fn encode_frame(snapshot: &ArenaState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&PushEvent::arena_state(snapshot.clone()))
}

/// Upgrades `GET /ws` into an observer connection.
pub async fn ws_arena(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_observer(socket, state))
}

async fn handle_observer(mut socket: WebSocket, state: Arc<AppState>) {
    // Subscribe first so no tick slips between the catch-up frame and the stream
    let mut rx = state.broadcaster.subscribe();
    info!(
        "Observer connected ({} total)",
        state.broadcaster.observer_count()
    );

    if state.snapshot_on_connect {
        let snapshot = state.arena.read().await.snapshot();
        match encode_frame(&snapshot) {
            Ok(frame) => {
                if socket.send(Message::Text(frame.into())).await.is_err() {
                    debug!("Observer left before catch-up snapshot");
                    return;
                }
            }
            Err(e) => error!("Failed to encode catch-up snapshot: {}", e),
        }
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(frame) => {
                        if socket.send(Message::Text(frame.into())).await.is_err() {
                            debug!("Observer send failed, dropping connection");
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Observer lagged, skipped {} snapshots", skipped);
                    }
                    Err(RecvError::Closed) => {
                        debug!("Broadcast channel closed");
                        break;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("Observer socket error: {}", e);
                        break;
                    }
                    // Observers have nothing to say; ignore text and binary frames
                    _ => {}
                }
            }
        }
    }

    info!("Observer disconnected");
}
