//! `WebSocket` transport for observer connections.
//!
//! Each connection gets its own bounded channel registered with the
//! [`super::ClientHub`]; a forwarding task drains the channel onto the
//! socket. No client-to-server application messages are defined, so the
//! receive side only watches for disconnection. A client that drops and
//! reconnects receives a fresh initial snapshot — that is the sole
//! reconciliation mechanism.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::http::AppState;
use crate::realtime::events::ServerEvent;

/// Handler for `GET /ws` — upgrades the connection and hands it to the
/// socket loop.
#[allow(clippy::unused_async)] // axum routes require async handlers
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one observer connection until it closes.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (tx, mut rx) = mpsc::channel::<ServerEvent>(state.config.client_buffer);
    let client_id = state.hub.register(tx, state.pending.list_all());
    info!(%client_id, "websocket client connected");

    // Forward hub events onto the wire until the channel or socket closes.
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(err) => {
                    warn!(%err, "failed to serialize event frame");
                }
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => {}
        }
    }

    state.hub.unregister(client_id);
    send_task.abort();
    info!(%client_id, "websocket client disconnected");
}
