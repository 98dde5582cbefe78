//! Study plan handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use tracing::info;

use studyplan_models::{StudyPlan, TaskId};

use crate::auth::AuthUser;
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::{GeneratePlanRequest, PlanGeneratedResponse};

/// POST /api/plans/generate - Generate a plan for a task, replacing any
/// previous one.
pub async fn generate_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<GeneratePlanRequest>,
) -> Result<Json<PlanGeneratedResponse>> {
    let task_id = req
        .task_id
        .filter(|id| !id.is_empty())
        .map(TaskId::from)
        .ok_or_else(|| ApiError::BadRequest("task_id is required".to_string()))?;
    let task = state.owned_task(&auth.user_id, &task_id)?;

    let plan = state.planner.plan_task(&task, Utc::now()).await;
    let model = plan.model.clone();
    let study_plan = StudyPlan::from_plan(task.id.clone(), plan);
    let plan_id = state.plans.replace_plan(&study_plan)?;
    info!(task_id = %task.id, plan_id = %plan_id, model = %model, "Plan stored");

    Ok(Json(PlanGeneratedResponse {
        plan_id: plan_id.to_string(),
        model,
    }))
}

/// GET /api/plans/:task_id - The stored plan for one of the user's tasks.
pub async fn get_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(task_id): Path<String>,
) -> Result<Json<StudyPlan>> {
    let task = state.owned_task(&auth.user_id, &TaskId::from(task_id))?;
    let plan = state
        .plans
        .load_for_task(&task.id)?
        .ok_or_else(|| ApiError::NotFound(format!("plan for task {}", task.id)))?;
    Ok(Json(plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{auth_user, make_test_state};
    use chrono::Duration;
    use studyplan_engine::STUB_MODEL;
    use studyplan_models::{TaskKind, TaskPriority, WorkItem};

    #[tokio::test]
    async fn test_generate_and_get_plan() {
        let state = make_test_state();
        let auth = auth_user();
        let task = WorkItem::new(
            auth.user_id.clone(),
            "Biology",
            TaskKind::Exam,
            Utc::now() + Duration::days(7),
        )
        .with_priority(TaskPriority::High);
        state.tasks.save(&task).unwrap();

        let req = GeneratePlanRequest {
            task_id: Some(task.id.to_string()),
        };
        let Json(generated) = generate_plan(State(state.clone()), auth.clone(), Json(req))
            .await
            .unwrap();
        assert_eq!(generated.model, STUB_MODEL);

        let Json(plan) = get_plan(State(state), auth, Path(task.id.to_string()))
            .await
            .unwrap();
        assert_eq!(plan.id.to_string(), generated.plan_id);
        assert_eq!(plan.total_allocated, 406);
        assert!(!plan.days.is_empty());
    }

    #[tokio::test]
    async fn test_generate_plan_requires_task_id() {
        let state = make_test_state();
        let result = generate_plan(
            State(state),
            auth_user(),
            Json(GeneratePlanRequest::default()),
        )
        .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_get_plan_missing() {
        let state = make_test_state();
        let auth = auth_user();
        let task = WorkItem::new(
            auth.user_id.clone(),
            "Essay",
            TaskKind::Assignment,
            Utc::now() + Duration::days(2),
        );
        state.tasks.save(&task).unwrap();

        let result = get_plan(State(state), auth, Path(task.id.to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
