//! Task handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::info;

use studyplan_models::{CourseId, TaskId, TaskKind, TaskPriority, WorkItem};

use crate::auth::AuthUser;
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::{BulkDeleteQuery, CreateTaskRequest, TaskListResponse};

/// GET /api/tasks - List the user's tasks by due date.
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<TaskListResponse>> {
    let tasks = state.tasks.list_for_user(&auth.user_id)?;
    let total = tasks.len();
    Ok(Json(TaskListResponse { tasks, total }))
}

/// POST /api/tasks - Create a task.
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<WorkItem>)> {
    let title = req
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let (Some(title), Some(kind), Some(due)) = (title, req.kind, req.due_at) else {
        return Err(ApiError::BadRequest(
            "title, kind and due_at are required".to_string(),
        ));
    };

    let kind = parse_task_kind(&kind)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown task kind: {}", kind)))?;
    let due_at =
        parse_due(&due).ok_or_else(|| ApiError::BadRequest(format!("invalid due date: {}", due)))?;
    let priority = match req.priority.as_deref() {
        Some(p) => parse_task_priority(p)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown priority: {}", p)))?,
        None => TaskPriority::default(),
    };

    let mut task = WorkItem::new(auth.user_id.clone(), title, kind, due_at)
        .with_priority(priority)
        .with_subtasks(
            req.subtasks
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        );
    task.notes = req.notes.filter(|n| !n.trim().is_empty());

    if let Some(course_id) = req.course_id.filter(|c| !c.is_empty()) {
        let course_id = CourseId::from(course_id);
        state
            .courses
            .load(&auth.user_id, &course_id)
            .map_err(|_| ApiError::BadRequest(format!("unknown course: {}", course_id)))?;
        task = task.with_course(course_id);
    }

    state.tasks.save(&task)?;
    info!(task_id = %task.id, kind = %task.kind, priority = %task.priority, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks/:id - Get one of the user's tasks.
pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<WorkItem>> {
    let task = state.owned_task(&auth.user_id, &TaskId::from(id))?;
    Ok(Json(task))
}

/// DELETE /api/tasks/:id - Delete a task and its plan.
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let task = state.owned_task(&auth.user_id, &TaskId::from(id))?;
    state.delete_tasks(std::slice::from_ref(&task))?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/tasks?all=true - Delete all of the user's tasks and plans.
pub async fn delete_all_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<BulkDeleteQuery>,
) -> Result<StatusCode> {
    if query.all != Some(true) {
        return Err(ApiError::BadRequest(
            "specify ?all=true or use /api/tasks/:id".to_string(),
        ));
    }
    let tasks = state.tasks.list_for_user(&auth.user_id)?;
    state.delete_tasks(&tasks)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/tasks/:id/complete - Toggle a task's completed flag.
pub async fn toggle_task_complete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<WorkItem>> {
    let mut task = state.owned_task(&auth.user_id, &TaskId::from(id))?;
    task.completed = !task.completed;
    state.tasks.save(&task)?;
    Ok(Json(task))
}

fn parse_task_kind(s: &str) -> Option<TaskKind> {
    match s.trim().to_uppercase().as_str() {
        "EXAM" => Some(TaskKind::Exam),
        "ASSIGNMENT" => Some(TaskKind::Assignment),
        _ => None,
    }
}

fn parse_task_priority(s: &str) -> Option<TaskPriority> {
    match s.trim().to_uppercase().as_str() {
        "LOW" => Some(TaskPriority::Low),
        "MEDIUM" => Some(TaskPriority::Medium),
        "HIGH" => Some(TaskPriority::High),
        _ => None,
    }
}

/// Accepts an RFC 3339 instant or a bare date (midnight UTC).
fn parse_due(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{auth_user, make_test_state};

    fn task_request(title: &str, due: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: Some(title.to_string()),
            kind: Some("exam".to_string()),
            due_at: Some(due.to_string()),
            priority: Some("high".to_string()),
            subtasks: vec!["Chapter 1".to_string(), "  ".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_list_tasks() {
        let state = make_test_state();
        let auth = auth_user();

        create_task(State(state.clone()), auth.clone(), Json(task_request("Later", "2026-05-01")))
            .await
            .unwrap();
        let (status, Json(task)) = create_task(
            State(state.clone()),
            auth.clone(),
            Json(task_request("Sooner", "2026-04-01T12:00:00Z")),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(task.kind, TaskKind::Exam);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.subtasks, vec!["Chapter 1"]);

        let Json(list) = list_tasks(State(state), auth).await.unwrap();
        assert_eq!(list.total, 2);
        assert_eq!(list.tasks[0].title, "Sooner");
    }

    #[tokio::test]
    async fn test_create_task_validation() {
        let state = make_test_state();

        let mut missing = task_request("Quiz", "2026-04-01");
        missing.due_at = None;
        let result = create_task(State(state.clone()), auth_user(), Json(missing)).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));

        let mut bad_kind = task_request("Quiz", "2026-04-01");
        bad_kind.kind = Some("PROJECT".to_string());
        let result = create_task(State(state.clone()), auth_user(), Json(bad_kind)).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));

        let mut unknown_course = task_request("Quiz", "2026-04-01");
        unknown_course.course_id = Some("course-missing".to_string());
        let result = create_task(State(state), auth_user(), Json(unknown_course)).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_toggle_and_delete_task() {
        let state = make_test_state();
        let auth = auth_user();
        let (_, Json(task)) =
            create_task(State(state.clone()), auth.clone(), Json(task_request("Quiz", "2026-04-01")))
                .await
                .unwrap();

        let Json(toggled) =
            toggle_task_complete(State(state.clone()), auth.clone(), Path(task.id.to_string()))
                .await
                .unwrap();
        assert!(toggled.completed);

        let result = get_task(State(state.clone()), auth_user(), Path(task.id.to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));

        delete_task(State(state.clone()), auth.clone(), Path(task.id.to_string()))
            .await
            .unwrap();
        let result = get_task(State(state), auth, Path(task.id.to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_task_kind("Assignment"), Some(TaskKind::Assignment));
        assert_eq!(parse_task_kind("quiz"), None);
        assert_eq!(parse_task_priority("LOW"), Some(TaskPriority::Low));
        assert_eq!(parse_task_priority("urgent"), None);
        assert_eq!(
            parse_due("2026-03-10").unwrap().to_rfc3339(),
            "2026-03-10T00:00:00+00:00"
        );
        assert_eq!(
            parse_due("2026-03-10T08:00:00+02:00").unwrap().to_rfc3339(),
            "2026-03-10T06:00:00+00:00"
        );
        assert!(parse_due("next friday").is_none());
    }
}
