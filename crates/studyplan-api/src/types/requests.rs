//! Request DTOs for the API.
//!
//! Required fields are optional here so that handlers can answer with a
//! 400 and a message instead of a deserialization rejection.

use serde::Deserialize;

/// Register or login request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Create course request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCourseRequest {
    /// Course name (required).
    pub name: Option<String>,
    /// Instructor name.
    pub instructor: Option<String>,
    /// Meeting days such as "Mon".
    #[serde(default, alias = "meetingDays")]
    pub meeting_days: Vec<String>,
}

/// Create task request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title (required).
    pub title: Option<String>,
    /// `EXAM` or `ASSIGNMENT` (required).
    #[serde(alias = "type")]
    pub kind: Option<String>,
    /// RFC 3339 instant or `YYYY-MM-DD` (required).
    #[serde(alias = "dueDate")]
    pub due_at: Option<String>,
    /// `LOW`, `MEDIUM` or `HIGH`; defaults to medium.
    pub priority: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Course to attach the task to.
    #[serde(alias = "courseId")]
    pub course_id: Option<String>,
    /// The user's own subtask labels.
    #[serde(default)]
    pub subtasks: Vec<String>,
}

/// Query for the bulk delete routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkDeleteQuery {
    /// Must be `true` to delete everything.
    pub all: Option<bool>,
}

/// Generate plan request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratePlanRequest {
    #[serde(alias = "taskId")]
    pub task_id: Option<String>,
}

/// Weekly timeline query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeeklyQuery {
    /// Skip the cache and regenerate.
    #[serde(default)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_request_aliases() {
        let json = r#"{
            "title": "Midterm",
            "type": "EXAM",
            "dueDate": "2026-03-10",
            "courseId": "course-1",
            "subtasks": ["Chapter 1", "Chapter 2"]
        }"#;
        let req: CreateTaskRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.kind.as_deref(), Some("EXAM"));
        assert_eq!(req.due_at.as_deref(), Some("2026-03-10"));
        assert_eq!(req.course_id.as_deref(), Some("course-1"));
        assert_eq!(req.subtasks.len(), 2);
        assert!(req.priority.is_none());
    }

    #[test]
    fn test_create_course_request_defaults() {
        let req: CreateCourseRequest = serde_json::from_str(r#"{"name": "Algebra"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("Algebra"));
        assert!(req.meeting_days.is_empty());
    }

    #[test]
    fn test_generate_plan_request_accepts_camel_case() {
        let req: GeneratePlanRequest = serde_json::from_str(r#"{"taskId": "task-1"}"#).unwrap();
        assert_eq!(req.task_id.as_deref(), Some("task-1"));
    }
}
