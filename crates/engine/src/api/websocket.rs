//! WebSocket handling for inventory clients.
//!
//! Every connection receives the current inventory on connect and again each
//! time a new display list is published, whichever connection caused it.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use pantry_domain::{DisplayList, Quantity};
use pantry_shared::{ClientMessage, ErrorCode, InventoryDto, ServerMessage};

use crate::app::App;
use crate::use_cases::InventoryError;

/// Buffer size for per-connection message channel.
const CONNECTION_CHANNEL_BUFFER: usize = 256;

/// WebSocket upgrade handler - entry point for new connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app): State<Arc<App>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app))
}

fn inventory_message(list: &DisplayList) -> ServerMessage {
    ServerMessage::InventoryUpdated {
        inventory: InventoryDto::from_list(list),
    }
}

/// Handle an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, app: Arc<App>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let connection_id = Uuid::new_v4();

    let (tx, mut rx) = mpsc::channel::<ServerMessage>(CONNECTION_CHANNEL_BUFFER);

    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    // Forward messages from the channel to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    // Snapshot on connect, then every published list
    let mut published = app.use_cases.inventory.subscribe();
    let initial = inventory_message(&published.borrow_and_update());
    let _ = tx.try_send(initial);
    let watch_tx = tx.clone();
    let watch_task = tokio::spawn(async move {
        while published.changed().await.is_ok() {
            let msg = inventory_message(&published.borrow_and_update());
            if watch_tx.send(msg).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(msg) => {
                    if let Some(response) = handle_message(msg, &app, connection_id).await {
                        if tx.try_send(response).is_err() {
                            tracing::warn!(
                                connection_id = %connection_id,
                                "Failed to send response, channel full or closed"
                            );
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(connection_id = %connection_id, error = %e, "Failed to parse message");
                    let _ = tx.try_send(ServerMessage::Error {
                        code: ErrorCode::BadRequest,
                        message: format!("Invalid message format: {}", e),
                    });
                }
            },
            Ok(Message::Close(_)) => {
                tracing::info!(connection_id = %connection_id, "WebSocket closed by client");
                break;
            }
            Err(e) => {
                tracing::error!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    watch_task.abort();
    send_task.abort();

    tracing::info!(connection_id = %connection_id, "WebSocket connection terminated");
}

/// Dispatch a parsed client message. Successful writes need no reply: the
/// published list reaches every connection through the watch channel.
async fn handle_message(
    msg: ClientMessage,
    app: &App,
    connection_id: Uuid,
) -> Option<ServerMessage> {
    let inventory = &app.use_cases.inventory;
    let result = match msg {
        ClientMessage::AddItem { name, quantity } => {
            inventory.add(&name, Some(Quantity::new(quantity))).await
        }
        ClientMessage::UpdateItem { name, quantity } => {
            inventory.update(&name, Quantity::new(quantity)).await
        }
        ClientMessage::RemoveItem { name } => inventory.remove(&name).await,
        ClientMessage::Refresh => inventory.refresh().await,
        ClientMessage::Ping => return Some(ServerMessage::Pong),
        ClientMessage::Unknown => {
            tracing::warn!(connection_id = %connection_id, "Unknown client message type");
            return Some(ServerMessage::Error {
                code: ErrorCode::BadRequest,
                message: "Unknown message type".to_string(),
            });
        }
    };

    result.err().map(|e| {
        tracing::debug!(connection_id = %connection_id, error = %e, "Client request failed");
        error_message(e)
    })
}

fn error_message(e: InventoryError) -> ServerMessage {
    match e {
        InventoryError::InvalidInput(inner) => ServerMessage::Error {
            code: ErrorCode::InvalidInput,
            message: inner.to_string(),
        },
        InventoryError::RemoteUnavailable(_) => ServerMessage::Error {
            code: ErrorCode::RemoteUnavailable,
            message: "Remote store unavailable".to_string(),
        },
    }
}
