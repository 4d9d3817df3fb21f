//! Live update feed
//!
//! WebSocket endpoint viewers subscribe to. Each connection gets its own
//! channel from the notifier; this task only drains that channel into the
//! socket, so broadcasts never wait on network I/O.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};

use crate::notifier::Notifier;
use crate::AppState;

pub async fn upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    let notifier = Arc::clone(&state.notifier);
    ws.on_upgrade(move |socket| handle_socket(socket, notifier))
}

async fn handle_socket(mut socket: WebSocket, notifier: Arc<Notifier>) {
    let (id, mut rx) = notifier.subscribe();
    notifier.open(id);

    // A viewer that goes away is noticed on the next push: the send fails
    // and the subscription closes. No replay for late joiners.
    while let Some(envelope) = rx.recv().await {
        let text = match serde_json::to_string(&envelope) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(subscriber = %id, "Failed to serialize envelope: {}", e);
                continue;
            }
        };
        if socket.send(Message::Text(text)).await.is_err() {
            break;
        }
    }

    notifier.close(id);
    let _ = socket.send(Message::Close(None)).await;
}
