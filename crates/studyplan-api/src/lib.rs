//! JSON HTTP API for the study planner.
//!
//! Routes cover accounts and sessions, courses, tasks, per-task study
//! plans with completable day tasks, and the cached weekly timeline.
//!
//! # Example
//!
//! ```ignore
//! use studyplan_api::{serve, ApiConfig, AppState};
//! use studyplan_engine::Planner;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let state = AppState::new(config.clone(), "/var/lib/studyplan", Planner::default());
//!
//!     serve(config, state).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use auth::{AuthUser, SessionStore};
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
