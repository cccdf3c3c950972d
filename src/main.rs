//! clara-gateway server entry point.
//!
//! Starts the Axum HTTP server with the robot, chat, and stream
//! endpoints.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use clara_gateway::api;
use clara_gateway::app_state::AppState;
use clara_gateway::config::GatewayConfig;
use clara_gateway::domain::{AssetStore, ConnectionRegistry, RobotState};
use clara_gateway::service::{ActionExecutor, ChatService, TokioClock};
use clara_gateway::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting clara-gateway");

    // Build domain layer
    let assets = Arc::new(AssetStore::new(config.asset_dir.clone()));
    let robot_state = Arc::new(RobotState::new());
    let registry = Arc::new(ConnectionRegistry::new(
        Arc::clone(&assets),
        config.frame_buffer,
    ));

    // Build service layer
    let executor = Arc::new(ActionExecutor::new(
        Arc::clone(&robot_state),
        Arc::clone(&registry),
        Arc::clone(&assets),
        Arc::new(TokioClock),
        config.stage_delay,
    ));
    let chat_service = Arc::new(ChatService::new(
        Arc::clone(&executor),
        Arc::clone(&registry),
        assets,
        config.stream_url.clone(),
    ));

    // Build application state
    let app_state = AppState {
        robot_state,
        executor,
        chat_service,
        registry,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws/robot-stream", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
