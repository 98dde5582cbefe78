//! Course persistence.

use std::path::PathBuf;

use studyplan_models::{Course, CourseId, UserId};

use crate::atomic::{
    atomic_write_json, checked_id, read_json_dir, read_json_optional, remove_dir, remove_file,
};
use crate::error::{PersistenceError, Result};

/// Stores courses grouped by owner:
/// ```text
/// base_path/
/// └── courses/
///     └── {user_id}/
///         └── course-abc123.json
/// ```
pub struct CourseStore {
    base_path: PathBuf,
}

impl CourseStore {
    /// Creates a new CourseStore with the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn user_dir(&self, user_id: &UserId) -> Result<PathBuf> {
        let user = checked_id("user", user_id.as_str())?;
        Ok(self.base_path.join("courses").join(user))
    }

    fn course_path(&self, user_id: &UserId, id: &CourseId) -> Result<PathBuf> {
        let id = checked_id("course", id.as_str())?;
        Ok(self.user_dir(user_id)?.join(format!("{}.json", id)))
    }

    /// Saves a course.
    pub fn save(&self, course: &Course) -> Result<()> {
        atomic_write_json(&self.course_path(&course.user_id, &course.id)?, course)
    }

    /// Loads one of the user's courses.
    pub fn load(&self, user_id: &UserId, id: &CourseId) -> Result<Course> {
        read_json_optional(&self.course_path(user_id, id)?)?
            .ok_or_else(|| PersistenceError::not_found("course", id))
    }

    /// Lists the user's courses, oldest first.
    pub fn list(&self, user_id: &UserId) -> Result<Vec<Course>> {
        let mut courses: Vec<Course> = read_json_dir(&self.user_dir(user_id)?)?;
        courses.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(courses)
    }

    /// Deletes one course. Returns whether it existed.
    pub fn delete(&self, user_id: &UserId, id: &CourseId) -> Result<bool> {
        remove_file(&self.course_path(user_id, id)?)
    }

    /// Deletes all of the user's courses.
    pub fn delete_all(&self, user_id: &UserId) -> Result<()> {
        remove_dir(&self.user_dir(user_id)?)
    }
}
