//! WebSocket connection handler
//!
//! Pushes every change event to the connected client as a JSON text frame.
//! Incoming frames are ignored apart from close.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use shared::{ProcessId, process_debug, process_info, process_warn};

use crate::state::RelayState;

pub async fn websocket_handler<R>(ws: WebSocketUpgrade, State(state): State<Arc<RelayState<R>>>) -> Response
where
    R: Send + Sync + 'static,
{
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

async fn handle_websocket<R>(socket: WebSocket, state: Arc<RelayState<R>>) {
    let client_id = Uuid::new_v4();
    // Subscribe before anything else so no change is missed after the upgrade
    let mut changes = state.subscribe();
    let connected = state.increment_connection_count();
    process_info!(ProcessId::current(), "🔗 WebSocket client {} connected ({} total)", client_id, connected);

    let (mut sender, mut receiver) = socket.split();

    let mut outgoing_task = tokio::spawn(async move {
        loop {
            let event = match changes.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    process_warn!(ProcessId::current(), "Client {} lagged, {} changes skipped", client_id, skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let frame = match event.to_json() {
                Ok(frame) => frame,
                Err(e) => {
                    process_warn!(ProcessId::current(), "Failed to encode change: {}", e);
                    continue;
                }
            };

            if sender.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
    });

    let mut incoming_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(Message::Text(text)) => {
                    process_debug!(ProcessId::current(), "Ignoring frame from {}: {}", client_id, text);
                }
                Ok(_) => {}
            }
        }
    });

    // Whichever side ends first ends the connection
    tokio::select! {
        _ = &mut outgoing_task => incoming_task.abort(),
        _ = &mut incoming_task => outgoing_task.abort(),
    }

    let remaining = state.decrement_connection_count();
    process_info!(ProcessId::current(), "🚪 WebSocket client {} disconnected ({} remaining)", client_id, remaining);
}
