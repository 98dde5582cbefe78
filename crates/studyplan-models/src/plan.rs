//! Study plan types.
//!
//! [`Plan`] is what the allocation engine produces for one task: an
//! ordered list of [`DayAllocation`]s. [`StudyPlan`] is the persisted form,
//! where every block becomes an addressable [`DayTask`] that can be ticked
//! off.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{DayTaskId, PlanId, TaskId};

/// A labelled block of study time within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanBlock {
    /// What to work on.
    pub label: String,
    /// Minutes allocated to the block.
    pub minutes: u32,
}

impl PlanBlock {
    /// Creates a new block.
    pub fn new(label: impl Into<String>, minutes: u32) -> Self {
        Self {
            label: label.into(),
            minutes,
        }
    }
}

/// Study time allocated to a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAllocation {
    /// Calendar date (serialized as `YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Blocks scheduled on this day.
    pub blocks: Vec<PlanBlock>,
    /// Sum of block minutes.
    pub total_minutes: u32,
}

impl DayAllocation {
    /// Creates a day from its blocks, deriving the total.
    pub fn new(date: NaiveDate, blocks: Vec<PlanBlock>) -> Self {
        let total_minutes = blocks
            .iter()
            .fold(0u32, |total, b| total.saturating_add(b.minutes));
        Self {
            date,
            blocks,
            total_minutes,
        }
    }
}

/// A generated multi-day plan for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Days in chronological order.
    pub days: Vec<DayAllocation>,
    /// Total effort the planner budgeted, before per-day rounding.
    pub total_allocated: u32,
    /// One-line explanation of the plan.
    pub rationale: String,
    /// Which path produced the plan (`stub` or `openai:<model>`).
    pub model: String,
}

impl Plan {
    /// Sum of the minutes actually placed on days.
    pub fn scheduled_minutes(&self) -> u32 {
        self.days
            .iter()
            .fold(0u32, |total, d| total.saturating_add(d.total_minutes))
    }
}

/// A persisted block that can be marked complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTask {
    /// Unique identifier for the block.
    pub id: DayTaskId,
    /// What to work on.
    pub label: String,
    /// Minutes allocated.
    pub minutes: u32,
    /// Whether the user ticked it off.
    #[serde(default)]
    pub completed: bool,
}

/// A persisted day of a study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyDay {
    /// Calendar date.
    pub date: NaiveDate,
    /// Sum of task minutes.
    pub total_minutes: u32,
    /// Blocks for the day.
    pub tasks: Vec<DayTask>,
}

/// A persisted study plan. At most one exists per task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    /// Unique identifier for the plan.
    pub id: PlanId,
    /// Task the plan was generated for.
    pub task_id: TaskId,
    /// Which path produced the plan.
    pub model: String,
    /// One-line explanation.
    pub rationale: String,
    /// Budgeted total minutes.
    pub total_allocated: u32,
    /// Days in chronological order.
    pub days: Vec<StudyDay>,
    /// When the plan was generated.
    pub created_at: DateTime<Utc>,
}

impl StudyPlan {
    /// Builds the persisted form of a generated plan, assigning fresh IDs.
    pub fn from_plan(task_id: TaskId, plan: Plan) -> Self {
        let days = plan
            .days
            .into_iter()
            .map(|day| StudyDay {
                date: day.date,
                total_minutes: day.total_minutes,
                tasks: day
                    .blocks
                    .into_iter()
                    .map(|block| DayTask {
                        id: DayTaskId::new(),
                        label: block.label,
                        minutes: block.minutes,
                        completed: false,
                    })
                    .collect(),
            })
            .collect();

        Self {
            id: PlanId::new(),
            task_id,
            model: plan.model,
            rationale: plan.rationale,
            total_allocated: plan.total_allocated,
            days,
            created_at: Utc::now(),
        }
    }

    /// Finds a day task by ID.
    pub fn day_task_mut(&mut self, id: &DayTaskId) -> Option<&mut DayTask> {
        self.days
            .iter_mut()
            .flat_map(|d| d.tasks.iter_mut())
            .find(|t| &t.id == id)
    }
}
