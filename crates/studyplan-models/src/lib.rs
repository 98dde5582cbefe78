//! Core data models for the study planner.
//!
//! This crate provides the value types shared by the allocation engine,
//! the persistence layer and the API: users, courses, tasks, generated
//! plans and weekly timelines.

pub mod course;
pub mod ids;
pub mod plan;
pub mod task;
pub mod user;
pub mod weekly;

// Re-export main types
pub use course::Course;
pub use ids::{CourseId, DayTaskId, PlanId, SuggestionId, TaskId, UserId};
pub use plan::{DayAllocation, DayTask, Plan, PlanBlock, StudyDay, StudyPlan};
pub use task::{TaskKind, TaskPriority, WorkItem};
pub use user::User;
pub use weekly::{Slot, WeeklyDay, WeeklyTimeline};
