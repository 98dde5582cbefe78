//! Persistence layer for the study planner.
//!
//! Every record is a JSON file written atomically (temp file, then
//! rename), so a crash never leaves a half-written record behind.
//!
//! # Example
//!
//! ```no_run
//! use studyplan_persistence::TaskStore;
//! use studyplan_models::TaskId;
//!
//! let store = TaskStore::new("/home/user/.studyplan");
//! let task = store.find_task(&TaskId::from("task-abc")).unwrap();
//! ```

pub mod atomic;
pub mod course_store;
pub mod error;
pub mod plan_store;
pub mod task_store;
pub mod user_store;
pub mod weekly_store;

pub use course_store::CourseStore;
pub use error::{PersistenceError, Result};
pub use plan_store::PlanStore;
pub use task_store::TaskStore;
pub use user_store::UserStore;
pub use weekly_store::{WeeklySnapshot, WeeklyStore};
