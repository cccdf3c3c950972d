//! Per-connection forwarding loop for the robot stream.
//!
//! Each WebSocket connection owns the receiving half of its registry
//! channel and forwards queued frames to the peer. The loop ends on
//! peer close, send failure, or registry-side removal; all three paths
//! unregister the subscriber.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::domain::{ConnectionRegistry, SubscriberId};

/// Runs the forwarding loop for a single stream subscriber.
pub async fn run_connection(
    socket: WebSocket,
    registry: Arc<ConnectionRegistry>,
    id: SubscriberId,
    mut frame_rx: mpsc::Receiver<Vec<u8>>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // Frame queued by a broadcast (or the catch-up delivery).
            frame = frame_rx.recv() => {
                match frame {
                    Some(bytes) => {
                        if ws_tx.send(Message::binary(bytes)).await.is_err() {
                            break;
                        }
                    }
                    // Sender dropped: the registry already removed us
                    // after a failed delivery.
                    None => break,
                }
            }
            // The client sends nothing of semantic meaning; any text
            // is a keep-alive no-op.
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(_))) => {}
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }

    registry.unregister(id).await;
    tracing::debug!(subscriber = %id, "robot stream connection closed");
}
