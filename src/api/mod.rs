//! REST API layer: route handlers, DTOs, and router composition.
//!
//! The robot and chat endpoints are mounted under `/v1`, matching the
//! paths clients of the original mock service already use.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/v1", handlers::routes())
        .merge(handlers::system::routes())
}
