//! Task persistence.

use std::path::PathBuf;

use studyplan_models::{CourseId, TaskId, UserId, WorkItem};

use crate::atomic::{atomic_write_json, checked_id, read_json_dir, read_json_optional, remove_file};
use crate::error::Result;

/// Stores tasks, one JSON file per task:
/// ```text
/// base_path/
/// └── tasks/
///     └── task-abc123.json
/// ```
///
/// Tasks are addressed by ID alone; ownership checks happen in the caller.
pub struct TaskStore {
    base_path: PathBuf,
}

impl TaskStore {
    /// Creates a new TaskStore with the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn tasks_dir(&self) -> PathBuf {
        self.base_path.join("tasks")
    }

    fn task_path(&self, id: &TaskId) -> Result<PathBuf> {
        let id = checked_id("task", id.as_str())?;
        Ok(self.tasks_dir().join(format!("{}.json", id)))
    }

    /// Saves a task, replacing any previous version.
    pub fn save(&self, task: &WorkItem) -> Result<()> {
        atomic_write_json(&self.task_path(&task.id)?, task)
    }

    /// Looks a task up by ID. Malformed IDs are reported as `NotFound`.
    pub fn find_task(&self, id: &TaskId) -> Result<Option<WorkItem>> {
        read_json_optional(&self.task_path(id)?)
    }

    /// Lists the user's tasks ordered by due date, earliest first.
    pub fn list_for_user(&self, user_id: &UserId) -> Result<Vec<WorkItem>> {
        let mut tasks: Vec<WorkItem> = read_json_dir::<WorkItem>(&self.tasks_dir())?
            .into_iter()
            .filter(|t| &t.user_id == user_id)
            .collect();
        tasks.sort_by(|a, b| {
            a.due_at
                .cmp(&b.due_at)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(tasks)
    }

    /// Lists the user's tasks that have not been marked done.
    pub fn list_open_for_user(&self, user_id: &UserId) -> Result<Vec<WorkItem>> {
        let mut tasks = self.list_for_user(user_id)?;
        tasks.retain(|t| !t.completed);
        Ok(tasks)
    }

    /// Lists the user's tasks attached to a course.
    pub fn list_for_course(&self, user_id: &UserId, course_id: &CourseId) -> Result<Vec<WorkItem>> {
        let mut tasks = self.list_for_user(user_id)?;
        tasks.retain(|t| t.course_id.as_ref() == Some(course_id));
        Ok(tasks)
    }

    /// Deletes a task. Returns whether it existed.
    pub fn delete(&self, id: &TaskId) -> Result<bool> {
        remove_file(&self.task_path(id)?)
    }
}
