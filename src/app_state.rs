//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, RobotState};
use crate::service::{ActionExecutor, ChatService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Singleton robot state, read by the status endpoint.
    pub robot_state: Arc<RobotState>,
    /// Single-slot action executor.
    pub executor: Arc<ActionExecutor>,
    /// Natural-language front-end.
    pub chat_service: Arc<ChatService>,
    /// Stream subscriber registry for the WebSocket endpoint.
    pub registry: Arc<ConnectionRegistry>,
}
