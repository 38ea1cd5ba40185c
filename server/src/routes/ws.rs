//! Websocket feed — pushes weather and message updates.
//!
//! DESIGN
//! ======
//! On upgrade the handler sends the current weather snapshot and the full
//! message log, then relays the shared broadcast channel. Every frame
//! carries complete state (there are no deltas), so a subscriber that lags
//! behind can safely skip straight to the newest frame.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → push `weather` then `messages`
//! 2. Refresh task / message submissions publish → relay to the socket
//! 3. Close (or send failure) → drop the subscription

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use updates::Update;

use crate::state::AppState;

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_feed(socket, state))
}

async fn run_feed(mut socket: WebSocket, state: AppState) {
    // Subscribe before the initial push so no update falls in the gap.
    let mut rx = state.feed.subscribe();

    for update in initial_updates(&state).await {
        if send_update(&mut socket, &update).await.is_err() {
            return;
        }
    }
    info!("feed: subscriber connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    None | Some(Err(_)) | Some(Ok(Message::Close(_))) => break,
                    // The feed is one-way; inbound frames are ignored.
                    Some(Ok(_)) => {}
                }
            }
            pushed = rx.recv() => {
                match pushed {
                    Ok(update) => {
                        if send_update(&mut socket, &update).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "feed: subscriber lagged; skipping to current state");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    info!("feed: subscriber disconnected");
}

/// Frames pushed to a subscriber immediately after upgrade: current
/// weather first, then the message log.
pub(crate) async fn initial_updates(state: &AppState) -> Vec<Update> {
    vec![
        Update::Weather(state.snapshot().await),
        Update::Messages(state.store.all().await),
    ]
}

async fn send_update(socket: &mut WebSocket, update: &Update) -> Result<(), ()> {
    let json = match serde_json::to_string(update) {
        Ok(j) => j,
        Err(e) => {
            warn!(error = %e, "feed: failed to serialize update");
            return Err(());
        }
    };
    debug!(kind = update.kind(), "feed: send update");
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
