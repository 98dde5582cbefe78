//! Study time allocation engine.
//!
//! Two allocators live here:
//! - [`allocate`] spreads one task's effort over the days until it is due.
//! - [`allocate_week`] fills the next seven days from all open tasks.
//!
//! Both are pure functions of their inputs and `now`. The [`Planner`] wraps
//! them with an optional [`TextGenerator`]: when one is configured the
//! planner asks it first and falls back to the deterministic allocators on
//! any failure.
//!
//! # Example
//!
//! ```ignore
//! use studyplan_engine::{Planner, PlannerConfig};
//!
//! let planner = Planner::new(PlannerConfig::default());
//! let plan = planner.plan_task(&task, chrono::Utc::now()).await;
//! ```

pub mod allocator;
pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod planner;
pub mod prompts;
pub mod response;
pub mod weekly;

pub use allocator::{allocate, horizon_days, total_effort, STUB_MODEL};
pub use client::OpenAiClient;
pub use config::{GeneratorConfig, PlannerConfig};
pub use error::{EngineError, Result};
pub use generator::TextGenerator;
pub use planner::Planner;
pub use weekly::{allocate_week, is_fresh, FALLBACK_MODEL, WEEKLY_CACHE_WINDOW_MINUTES};
