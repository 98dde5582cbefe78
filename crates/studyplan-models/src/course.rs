//! Course types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CourseId, UserId};

/// A course a user is enrolled in. Tasks may be attached to a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier for the course.
    pub id: CourseId,

    /// Owner of the course.
    pub user_id: UserId,

    /// Course name.
    pub name: String,

    /// Instructor name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,

    /// Days the course meets (e.g. "Mon", "Wed").
    #[serde(default)]
    pub meeting_days: Vec<String>,

    /// When the course was created.
    pub created_at: DateTime<Utc>,
}

impl Course {
    /// Creates a new course.
    pub fn new(user_id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: CourseId::new(),
            user_id: user_id.into(),
            name: name.into(),
            instructor: None,
            meeting_days: Vec::new(),
            created_at: Utc::now(),
        }
    }
}
