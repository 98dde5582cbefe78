//! Account data reset.

use axum::{extract::State, Json};
use tracing::info;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::state::AppState;
use crate::types::StatusResponse;

/// POST /api/reset - Delete all of the user's plans, tasks and courses.
///
/// The account and weekly timeline history are kept.
pub async fn reset(State(state): State<AppState>, auth: AuthUser) -> Result<Json<StatusResponse>> {
    let tasks = state.tasks.list_for_user(&auth.user_id)?;
    state.delete_tasks(&tasks)?;
    state.courses.delete_all(&auth.user_id)?;
    info!(user_id = %auth.user_id, tasks = tasks.len(), "User data reset");

    Ok(Json(StatusResponse::new("reset")))
}
