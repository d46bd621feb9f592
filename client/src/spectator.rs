//! Passive observer of the `arena_state` push channel

use crate::game::ArenaView;
use crate::network::ClientError;
use futures::StreamExt;
use log::{debug, info, warn};
use shared::{PushEvent, ARENA_STATE_EVENT};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Decodes one push frame. Frames for other events yield `None`.
pub fn decode_frame(text: &str) -> Option<PushEvent> {
    match serde_json::from_str::<PushEvent>(text) {
        Ok(event) if event.event == ARENA_STATE_EVENT => Some(event),
        Ok(event) => {
            debug!("Ignoring push event {}", event.event);
            None
        }
        Err(e) => {
            warn!("Undecodable push frame: {}", e);
            None
        }
    }
}

/// One-line summary of a snapshot for the log
pub fn summarize(view: &ArenaView) -> String {
    match view.weakest() {
        Some(weakest) => format!(
            "{} agents, weakest {} at {} hp",
            view.agents.len(),
            weakest.name,
            weakest.health
        ),
        None => "arena is empty".to_string(),
    }
}

/// Follows the push channel until the server closes it or `limit` snapshots
/// have arrived. Returns the last view.
pub async fn spectate(url: &str, limit: Option<u64>) -> Result<ArenaView, ClientError> {
    let (mut stream, _) = connect_async(url).await?;
    info!("Spectating {}", url);

    let mut view = ArenaView::new(None);

    while let Some(message) = stream.next().await {
        match message? {
            Message::Text(text) => {
                if let Some(event) = decode_frame(text.as_str()) {
                    view.apply_state(event.data);
                    info!("Snapshot {}: {}", view.updates, summarize(&view));

                    if limit.is_some_and(|limit| view.updates >= limit) {
                        break;
                    }
                }
            }
            Message::Close(_) => {
                info!("Server closed the push channel");
                break;
            }
            _ => {}
        }
    }

    Ok(view)
}
