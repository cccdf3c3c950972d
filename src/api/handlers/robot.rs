//! Robot control handlers: submit action, query status.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::{ActionResult, RobotAction, RobotStatus};
use crate::error::GatewayError;

/// `POST /v1/robot/action` — Execute a robot action.
///
/// The response is returned only after full completion, including all
/// staged waits of a `pick_and_place`. Rejections and failures come
/// back as a failure [`ActionResult`] with HTTP 200, never as an HTTP
/// error.
///
/// # Errors
///
/// Returns [`GatewayError`] only on transport-level faults.
#[utoipa::path(
    post,
    path = "/v1/robot/action",
    tag = "Robot",
    summary = "Execute a robot action",
    description = "Runs a single action to completion. At most one action executes at a time; a busy robot rejects the request with a failure result.",
    request_body = RobotAction,
    responses(
        (status = 200, description = "Execution outcome", body = ActionResult),
    )
)]
pub async fn robot_action(
    State(state): State<AppState>,
    Json(action): Json<RobotAction>,
) -> Result<impl IntoResponse, GatewayError> {
    let result = state.executor.execute(&action).await;
    Ok(Json(result))
}

/// `GET /v1/robot/status` — Current robot state snapshot.
#[utoipa::path(
    get,
    path = "/v1/robot/status",
    tag = "Robot",
    summary = "Query robot status",
    description = "Returns the current position, holding state, held object, and busy flag.",
    responses(
        (status = 200, description = "State snapshot", body = RobotStatus),
    )
)]
pub async fn robot_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.robot_state.status().await)
}

/// Robot routes mounted under `/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/robot/action", post(robot_action))
        .route("/robot/status", get(robot_status))
}
