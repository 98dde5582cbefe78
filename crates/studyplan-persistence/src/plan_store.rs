//! Study plan persistence.

use std::path::PathBuf;

use studyplan_models::{DayTaskId, PlanId, StudyPlan, TaskId};

use crate::atomic::{atomic_write_json, checked_id, read_json_optional, remove_file};
use crate::error::{PersistenceError, Result};

/// Stores at most one plan per task:
/// ```text
/// base_path/
/// └── plans/
///     └── {task_id}.json
/// ```
pub struct PlanStore {
    base_path: PathBuf,
}

impl PlanStore {
    /// Creates a new PlanStore with the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn plan_path(&self, task_id: &TaskId) -> Result<PathBuf> {
        let id = checked_id("task", task_id.as_str())?;
        Ok(self.base_path.join("plans").join(format!("{}.json", id)))
    }

    /// Stores `plan` as the task's only plan, replacing any earlier one
    /// together with its day tasks.
    pub fn replace_plan(&self, plan: &StudyPlan) -> Result<PlanId> {
        atomic_write_json(&self.plan_path(&plan.task_id)?, plan)?;
        Ok(plan.id.clone())
    }

    /// Loads the plan for a task, if one exists.
    pub fn load_for_task(&self, task_id: &TaskId) -> Result<Option<StudyPlan>> {
        read_json_optional(&self.plan_path(task_id)?)
    }

    /// Deletes the plan for a task. Returns whether one existed.
    pub fn delete_for_task(&self, task_id: &TaskId) -> Result<bool> {
        remove_file(&self.plan_path(task_id)?)
    }

    /// Flips the completed flag of a day task in one of the given tasks'
    /// plans and returns the new value.
    pub fn toggle_day_task(&self, task_ids: &[TaskId], id: &DayTaskId) -> Result<bool> {
        for task_id in task_ids {
            let Some(mut plan) = self.load_for_task(task_id)? else {
                continue;
            };
            if let Some(day_task) = plan.day_task_mut(id) {
                day_task.completed = !day_task.completed;
                let completed = day_task.completed;
                atomic_write_json(&self.plan_path(task_id)?, &plan)?;
                return Ok(completed);
            }
        }
        Err(PersistenceError::not_found("day task", id))
    }
}
