//! Day task handlers.

use axum::{
    extract::{Path, State},
    Json,
};

use studyplan_models::{DayTaskId, TaskId};

use crate::auth::AuthUser;
use crate::error::Result;
use crate::state::AppState;
use crate::types::DayTaskToggleResponse;

/// POST /api/day-tasks/:id/complete - Toggle a plan block's completed flag.
pub async fn toggle_day_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DayTaskToggleResponse>> {
    let owned: Vec<TaskId> = state
        .tasks
        .list_for_user(&auth.user_id)?
        .into_iter()
        .map(|t| t.id)
        .collect();
    let id = DayTaskId::from(id);
    let completed = state.plans.toggle_day_task(&owned, &id)?;

    Ok(Json(DayTaskToggleResponse {
        id: id.to_string(),
        completed,
    }))
}
