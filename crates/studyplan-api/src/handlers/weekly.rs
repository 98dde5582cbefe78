//! Weekly timeline handler.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use tracing::{debug, info};

use studyplan_engine::is_fresh;
use studyplan_models::WeeklyTimeline;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::state::AppState;
use crate::types::WeeklyQuery;

/// GET /api/weekly?force=bool - The user's seven-day timeline.
///
/// A snapshot generated in the last ten minutes is served as is unless
/// `force` is set. Otherwise a new timeline is generated from the open
/// tasks and appended to the history.
pub async fn weekly_timeline(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<WeeklyQuery>,
) -> Result<Json<WeeklyTimeline>> {
    let now = Utc::now();
    let latest = state.weekly.latest(&auth.user_id)?;

    if let Some(cached) = &latest {
        if is_fresh(cached.generated_at, now, query.force) {
            debug!(user_id = %auth.user_id, generated_at = %cached.generated_at, "Serving cached weekly timeline");
            return Ok(Json(cached.clone()));
        }
    }

    let tasks = state.tasks.list_open_for_user(&auth.user_id)?;
    if tasks.is_empty() {
        let empty = WeeklyTimeline::empty(now);
        if latest.is_none() {
            state.weekly.append(&auth.user_id, &empty)?;
        }
        return Ok(Json(empty));
    }

    let timeline = state.planner.plan_week(&tasks, now).await;
    let snapshot_id = state.weekly.append(&auth.user_id, &timeline)?;
    info!(
        user_id = %auth.user_id,
        snapshot_id = %snapshot_id,
        model = %timeline.model,
        minutes = timeline.total_week_minutes,
        "Weekly timeline stored"
    );

    Ok(Json(timeline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{auth_user, make_test_state};
    use chrono::Duration;
    use studyplan_engine::FALLBACK_MODEL;
    use studyplan_models::{TaskKind, TaskPriority, WorkItem};

    #[tokio::test]
    async fn test_weekly_cache_and_force() {
        let state = make_test_state();
        let auth = auth_user();
        let task = WorkItem::new(
            auth.user_id.clone(),
            "Physics",
            TaskKind::Exam,
            Utc::now() + Duration::days(3),
        )
        .with_priority(TaskPriority::High);
        state.tasks.save(&task).unwrap();

        let Json(first) = weekly_timeline(State(state.clone()), auth.clone(), Query(WeeklyQuery::default()))
            .await
            .unwrap();
        assert_eq!(first.model, FALLBACK_MODEL);
        assert_eq!(first.days.len(), 7);

        let Json(second) = weekly_timeline(State(state.clone()), auth.clone(), Query(WeeklyQuery::default()))
            .await
            .unwrap();
        assert_eq!(second.generated_at, first.generated_at);

        let Json(forced) =
            weekly_timeline(State(state.clone()), auth.clone(), Query(WeeklyQuery { force: true }))
                .await
                .unwrap();
        assert!(forced.generated_at > first.generated_at);
        assert_eq!(state.weekly.count(&auth.user_id).unwrap(), 2);
    }

    #[tokio::test]
    async fn test_weekly_without_open_tasks() {
        let state = make_test_state();
        let auth = auth_user();

        let Json(timeline) = weekly_timeline(State(state.clone()), auth.clone(), Query(WeeklyQuery { force: true }))
            .await
            .unwrap();
        assert_eq!(timeline.model, WeeklyTimeline::EMPTY_MODEL);
        assert!(timeline.days.is_empty());
        assert_eq!(state.weekly.count(&auth.user_id).unwrap(), 1);

        // An existing snapshot is not overwritten by another empty one
        weekly_timeline(State(state.clone()), auth.clone(), Query(WeeklyQuery { force: true }))
            .await
            .unwrap();
        assert_eq!(state.weekly.count(&auth.user_id).unwrap(), 1);
    }
}
