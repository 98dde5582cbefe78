//! Weekly timeline snapshots.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use studyplan_models::{SuggestionId, UserId, WeeklyTimeline};

use crate::atomic::{atomic_write_json, checked_id, read_json_dir};
use crate::error::Result;

/// A stored weekly timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySnapshot {
    pub id: SuggestionId,
    pub user_id: UserId,
    pub timeline: WeeklyTimeline,
}

/// Append-only store of weekly timelines per user:
/// ```text
/// base_path/
/// └── weekly/
///     └── {user_id}/
///         └── week-abc123.json
/// ```
pub struct WeeklyStore {
    base_path: PathBuf,
}

impl WeeklyStore {
    /// Creates a new WeeklyStore with the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn user_dir(&self, user_id: &UserId) -> Result<PathBuf> {
        let user = checked_id("user", user_id.as_str())?;
        Ok(self.base_path.join("weekly").join(user))
    }

    /// Stores a new snapshot. Earlier snapshots are kept.
    pub fn append(&self, user_id: &UserId, timeline: &WeeklyTimeline) -> Result<SuggestionId> {
        let snapshot = WeeklySnapshot {
            id: SuggestionId::new(),
            user_id: user_id.clone(),
            timeline: timeline.clone(),
        };
        let path = self.user_dir(user_id)?.join(format!("{}.json", snapshot.id));
        atomic_write_json(&path, &snapshot)?;
        Ok(snapshot.id)
    }

    /// Returns the most recently generated snapshot for the user.
    pub fn latest(&self, user_id: &UserId) -> Result<Option<WeeklyTimeline>> {
        let snapshots: Vec<WeeklySnapshot> = read_json_dir(&self.user_dir(user_id)?)?;
        Ok(snapshots
            .into_iter()
            .max_by(|a, b| {
                a.timeline
                    .generated_at
                    .cmp(&b.timeline.generated_at)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .map(|s| s.timeline))
    }

    /// Number of stored snapshots for the user.
    pub fn count(&self, user_id: &UserId) -> Result<usize> {
        let snapshots: Vec<WeeklySnapshot> = read_json_dir(&self.user_dir(user_id)?)?;
        Ok(snapshots.len())
    }
}
