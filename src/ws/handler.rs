//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;

/// `GET /ws/robot-stream` — Upgrade to the live robot stream.
///
/// Registration happens after the upgrade completes, so the catch-up
/// status frame (if any) is the first thing the peer receives.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let registry = Arc::clone(&state.registry);

    ws.on_upgrade(move |socket| async move {
        let (id, frame_rx) = registry.register().await;
        run_connection(socket, registry, id, frame_rx).await;
    })
}
