//! API request handlers.

pub mod auth;
pub mod courses;
pub mod day_tasks;
pub mod health;
pub mod plans;
pub mod reset;
pub mod tasks;
pub mod weekly;

pub use auth::*;
pub use courses::*;
pub use day_tasks::*;
pub use health::*;
pub use plans::*;
pub use reset::*;
pub use tasks::*;
pub use weekly::*;
