//! Response DTOs for the API.

use serde::Serialize;

use studyplan_models::{Course, WorkItem};

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Whether plans are generated with a language model.
    pub ai_enabled: bool,
}

/// Returned after register or login.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub user_id: String,
    pub username: String,
    /// Session token, also set as the `auth_token` cookie.
    pub token: String,
}

/// Course list response.
#[derive(Debug, Clone, Serialize)]
pub struct CourseListResponse {
    pub courses: Vec<Course>,
    pub total: usize,
}

/// Task list response, ordered by due date.
#[derive(Debug, Clone, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<WorkItem>,
    pub total: usize,
}

/// Returned after generating a plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanGeneratedResponse {
    /// ID of the stored plan.
    pub plan_id: String,
    /// Which path produced the plan.
    pub model: String,
}

/// Returned after toggling a day task.
#[derive(Debug, Clone, Serialize)]
pub struct DayTaskToggleResponse {
    pub id: String,
    pub completed: bool,
}

/// Generic status response.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}
