//! Course handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use studyplan_models::{Course, CourseId};

use crate::auth::AuthUser;
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::{BulkDeleteQuery, CourseListResponse, CreateCourseRequest};

/// GET /api/courses - List the user's courses.
pub async fn list_courses(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CourseListResponse>> {
    let courses = state.courses.list(&auth.user_id)?;
    let total = courses.len();
    Ok(Json(CourseListResponse { courses, total }))
}

/// POST /api/courses - Create a course.
pub async fn create_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>)> {
    let name = req
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::BadRequest("name is required".to_string()))?;

    let mut course = Course::new(auth.user_id, name);
    course.instructor = req.instructor.filter(|i| !i.trim().is_empty());
    course.meeting_days = req.meeting_days;
    state.courses.save(&course)?;

    Ok((StatusCode::CREATED, Json(course)))
}

/// DELETE /api/courses/:id - Delete a course with its tasks and plans.
pub async fn delete_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let course_id = CourseId::from(id);
    // 404 for missing and foreign courses alike
    state.courses.load(&auth.user_id, &course_id)?;

    let tasks = state.tasks.list_for_course(&auth.user_id, &course_id)?;
    state.delete_tasks(&tasks)?;
    state.courses.delete(&auth.user_id, &course_id)?;
    info!(course_id = %course_id, tasks = tasks.len(), "Course deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/courses?all=true - Delete every course with its tasks and plans.
pub async fn delete_all_courses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<BulkDeleteQuery>,
) -> Result<StatusCode> {
    if query.all != Some(true) {
        return Err(ApiError::BadRequest(
            "specify ?all=true or use /api/courses/:id".to_string(),
        ));
    }

    let tasks: Vec<_> = state
        .tasks
        .list_for_user(&auth.user_id)?
        .into_iter()
        .filter(|t| t.course_id.is_some())
        .collect();
    state.delete_tasks(&tasks)?;
    state.courses.delete_all(&auth.user_id)?;

    Ok(StatusCode::NO_CONTENT)
}
