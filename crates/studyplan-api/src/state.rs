//! Application state shared across handlers.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use studyplan_engine::Planner;
use studyplan_models::{TaskId, UserId, WorkItem};
use studyplan_persistence::{CourseStore, PlanStore, TaskStore, UserStore, WeeklyStore};

use crate::auth::SessionStore;
use crate::config::ApiConfig;
use crate::error::{ApiError, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Registered users.
    pub users: Arc<UserStore>,
    /// Courses per user.
    pub courses: Arc<CourseStore>,
    /// Tasks.
    pub tasks: Arc<TaskStore>,
    /// One study plan per task.
    pub plans: Arc<PlanStore>,
    /// Weekly timeline history.
    pub weekly: Arc<WeeklyStore>,
    /// Plan and timeline generation.
    pub planner: Arc<Planner>,
    /// Live login sessions.
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Creates state with every store rooted at `data_dir`.
    pub fn new(config: ApiConfig, data_dir: impl Into<PathBuf>, planner: Planner) -> Self {
        let data_dir = data_dir.into();
        info!(
            data_dir = %data_dir.display(),
            ai_enabled = planner.is_ai_enabled(),
            "Initializing application state"
        );

        Self {
            sessions: Arc::new(SessionStore::new(config.session_ttl)),
            config: Arc::new(config),
            users: Arc::new(UserStore::new(&data_dir)),
            courses: Arc::new(CourseStore::new(&data_dir)),
            tasks: Arc::new(TaskStore::new(&data_dir)),
            plans: Arc::new(PlanStore::new(&data_dir)),
            weekly: Arc::new(WeeklyStore::new(&data_dir)),
            planner: Arc::new(planner),
        }
    }

    /// Loads a task owned by `user_id`. Other users' tasks are reported as
    /// missing.
    pub fn owned_task(&self, user_id: &UserId, task_id: &TaskId) -> Result<WorkItem> {
        match self.tasks.find_task(task_id)? {
            Some(task) if &task.user_id == user_id => Ok(task),
            _ => Err(ApiError::NotFound(format!("task {}", task_id))),
        }
    }

    /// Deletes tasks and their plans.
    pub fn delete_tasks(&self, tasks: &[WorkItem]) -> Result<()> {
        for task in tasks {
            self.plans.delete_for_task(&task.id)?;
            self.tasks.delete(&task.id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use studyplan_models::TaskKind;
    use tempfile::tempdir;

    fn make_test_state() -> AppState {
        let dir = tempdir().unwrap();
        let path = dir.path().to_path_buf();
        std::mem::forget(dir);

        AppState::new(ApiConfig::default(), path, Planner::default())
    }

    #[test]
    fn test_owned_task() {
        let state = make_test_state();
        let owner = UserId::new();
        let task = WorkItem::new(owner.clone(), "Quiz", TaskKind::Exam, Utc::now() + Duration::days(1));
        state.tasks.save(&task).unwrap();

        assert_eq!(state.owned_task(&owner, &task.id).unwrap().id, task.id);
        assert!(matches!(
            state.owned_task(&UserId::new(), &task.id),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            state.owned_task(&owner, &TaskId::new()),
            Err(ApiError::NotFound(_))
        ));
    }
}
