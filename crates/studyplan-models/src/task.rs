//! Task types.
//!
//! A task is an exam or an assignment with a due instant and a priority.
//! Tasks are the unit the allocation engine plans for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{CourseId, TaskId, UserId};

/// Kind of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskKind {
    /// An exam to prepare for.
    Exam,
    /// An assignment to produce.
    Assignment,
}

impl TaskKind {
    /// Returns the wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Exam => "EXAM",
            TaskKind::Assignment => "ASSIGNMENT",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority levels for tasks.
///
/// High (3) > Medium (2) > Low (1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    /// Low priority (1).
    Low,
    /// Medium priority (2).
    #[default]
    Medium,
    /// High priority (3).
    High,
}

impl TaskPriority {
    /// Returns the numeric value of this priority.
    pub fn as_value(&self) -> u32 {
        match self {
            TaskPriority::Low => 1,
            TaskPriority::Medium => 2,
            TaskPriority::High => 3,
        }
    }

    /// Returns the wire name of the priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
        }
    }
}

impl PartialOrd for TaskPriority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TaskPriority {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_value().cmp(&other.as_value())
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task owned by a user: an exam or assignment with a due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Unique identifier for the task.
    pub id: TaskId,

    /// Owner of the task.
    pub user_id: UserId,

    /// Course the task belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<CourseId>,

    /// Title shown to the user and used in generated labels.
    pub title: String,

    /// Exam or assignment.
    pub kind: TaskKind,

    /// Priority level.
    #[serde(default)]
    pub priority: TaskPriority,

    /// When the task is due.
    pub due_at: DateTime<Utc>,

    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// User-supplied subtask labels, used verbatim by the planner.
    #[serde(default)]
    pub subtasks: Vec<String>,

    /// Whether the task has been marked done.
    #[serde(default)]
    pub completed: bool,

    /// When the task was created.
    pub created_at: DateTime<Utc>,
}

impl WorkItem {
    /// Creates a new task with medium priority and no subtasks.
    pub fn new(
        user_id: impl Into<UserId>,
        title: impl Into<String>,
        kind: TaskKind,
        due_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            user_id: user_id.into(),
            course_id: None,
            title: title.into(),
            kind,
            priority: TaskPriority::Medium,
            due_at,
            notes: None,
            subtasks: Vec::new(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the user-supplied subtask labels.
    pub fn with_subtasks(mut self, subtasks: Vec<String>) -> Self {
        self.subtasks = subtasks;
        self
    }

    /// Attaches the task to a course.
    pub fn with_course(mut self, course_id: CourseId) -> Self {
        self.course_id = Some(course_id);
        self
    }

    /// Returns true if the user supplied at least one subtask label.
    pub fn has_user_subtasks(&self) -> bool {
        !self.subtasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_priority_ordering() {
        assert!(TaskPriority::High > TaskPriority::Medium);
        assert!(TaskPriority::Medium > TaskPriority::Low);
        assert_eq!(TaskPriority::High.as_value(), 3);
    }

    #[test]
    fn test_kind_wire_format() {
        assert_eq!(serde_json::to_string(&TaskKind::Exam).unwrap(), "\"EXAM\"");
        let kind: TaskKind = serde_json::from_str("\"ASSIGNMENT\"").unwrap();
        assert_eq!(kind, TaskKind::Assignment);
    }

    #[test]
    fn test_work_item_builders() {
        let due = Utc::now() + Duration::days(3);
        let item = WorkItem::new("user-1", "Calculus", TaskKind::Exam, due)
            .with_priority(TaskPriority::High)
            .with_subtasks(vec!["Limits".into(), "Series".into()]);

        assert_eq!(item.priority, TaskPriority::High);
        assert!(item.has_user_subtasks());
        assert!(!item.completed);
        assert!(item.id.as_str().starts_with("task-"));
    }

    #[test]
    fn test_missing_priority_defaults_to_medium() {
        let json = r#"{
            "id": "task-1",
            "user_id": "user-1",
            "title": "Essay",
            "kind": "ASSIGNMENT",
            "due_at": "2026-01-10T00:00:00Z",
            "created_at": "2026-01-01T00:00:00Z"
        }"#;
        let item: WorkItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.priority, TaskPriority::Medium);
        assert!(item.subtasks.is_empty());
    }
}
