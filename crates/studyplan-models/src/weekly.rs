//! Weekly timeline types.
//!
//! A weekly timeline spreads all of a user's open tasks over the seven days
//! starting today. Snapshots are persisted append-only.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::TaskId;
use crate::task::{TaskKind, TaskPriority};

/// A share of one day given to one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Task being worked on.
    pub task_id: TaskId,
    /// Task title at generation time.
    pub title: String,
    /// Task priority at generation time.
    pub priority: TaskPriority,
    /// Task kind.
    pub kind: TaskKind,
    /// Minutes given to the task on this day.
    pub minutes: u32,
    /// Fraction of the day's total minutes.
    pub share: f64,
}

/// One day of a weekly timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyDay {
    /// Calendar date.
    pub date: NaiveDate,
    /// Sum of slot minutes, floored at 1.
    pub total_minutes: u32,
    /// Slots in scheduling order.
    pub slots: Vec<Slot>,
}

/// A seven-day cross-task timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTimeline {
    /// When the timeline was generated.
    pub generated_at: DateTime<Utc>,
    /// Which path produced the timeline.
    pub model: String,
    /// Sum of the daily totals.
    pub total_week_minutes: u32,
    /// Days in chronological order.
    pub days: Vec<WeeklyDay>,
}

impl WeeklyTimeline {
    /// Model tag used when the user has no open tasks.
    pub const EMPTY_MODEL: &'static str = "none";

    /// Creates the timeline returned when there is nothing to schedule.
    pub fn empty(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            model: Self::EMPTY_MODEL.to_string(),
            total_week_minutes: 0,
            days: Vec::new(),
        }
    }
}
