//! Prompts sent to the text generator.

use chrono::{DateTime, Utc};
use serde_json::json;

use studyplan_models::WorkItem;

use crate::weekly::days_until_due;

/// System instruction for single-task plans.
pub const PLAN_SYSTEM_PROMPT: &str = "You are a study planning assistant. Plan like a real \
student who balances urgency, priority and a realistic workload. Produce specific, useful \
study blocks. Output only valid JSON with no Markdown fences.";

/// System instruction for weekly timelines.
pub const WEEKLY_SYSTEM_PROMPT: &str = "You are a student planning assistant. Balance urgency, \
priority and realistic daily workloads across the week. Output only valid JSON.";

const PLAN_RESPONSE_FORMAT: &str = r#"Return ONLY valid JSON in this shape:
{
  "exam": "<task title>",
  "totalAllocated": <total minutes>,
  "summaries": {"<task title>": "brief planning rationale"},
  "days": [
    {
      "date": "YYYY-MM-DD",
      "totalMinutes": <sum of task minutes for the day>,
      "tasks": [{"text": "<block description>", "minutes": <number>}]
    }
  ]
}"#;

const WEEKLY_RESPONSE_FORMAT: &str = r#"Return ONLY valid JSON in this shape:
{
  "model": "<model name>",
  "totalWeekMinutes": <number>,
  "days": [
    {
      "date": "YYYY-MM-DD",
      "totalMinutes": <number>,
      "slots": [
        {"taskId": "<id>", "title": "<title>", "priority": "HIGH|MEDIUM|LOW",
         "type": "EXAM|ASSIGNMENT", "minutes": <number>, "share": <0.0-1.0>}
      ]
    }
  ]
}"#;

fn task_header(task: &WorkItem, horizon_days: u32) -> String {
    format!(
        "Task: {}\nType: {}\nPriority: {} (HIGH=3, MEDIUM=2, LOW=1)\nDue Date: {}\nDays Available: {}",
        task.title,
        task.kind,
        task.priority,
        task.due_at.format("%Y-%m-%d"),
        horizon_days
    )
}

/// Builds the prompt for a single task's plan over `horizon_days`.
///
/// When the task carries its own subtasks the model is told to use exactly
/// those labels.
pub fn task_plan_prompt(task: &WorkItem, horizon_days: u32) -> String {
    let header = task_header(task, horizon_days);

    if task.has_user_subtasks() {
        let subtasks = task
            .subtasks
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. {}", i + 1, s))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Create a realistic study plan for this task using the user's own subtasks.\n\n\
             {header}\n\nUser-Provided Subtasks:\n{subtasks}\n\n\
             Rules:\n\
             1. Use ONLY the subtasks listed above, with their exact names.\n\
             2. Spread them over the {horizon_days} available days, weighing priority and urgency.\n\
             3. Each session is 15-90 minutes; a subtask may appear on several days.\n\
             4. Keep this task under 2-3 hours on any day.\n\
             5. Exams ramp up towards the due date; assignments are front-loaded.\n\n\
             {PLAN_RESPONSE_FORMAT}"
        )
    } else {
        format!(
            "Create a realistic study plan for this task.\n\n{header}\n\n\
             Rules:\n\
             1. Higher priority and closer deadlines get more total time.\n\
             2. Break the work into specific blocks of 15-90 minutes \
             (e.g. \"Review chapter 3\", \"Practice problems\", \"Draft outline\", \"Edit\").\n\
             3. Exams ramp up towards the due date; assignments are front-loaded.\n\
             4. Aim for 30-180 minutes per day for this task.\n\n\
             {PLAN_RESPONSE_FORMAT}"
        )
    }
}

/// Builds the prompt for a seven-day timeline across `tasks`.
pub fn weekly_prompt(tasks: &[WorkItem], now: DateTime<Utc>) -> String {
    let task_list: Vec<serde_json::Value> = tasks
        .iter()
        .map(|t| {
            json!({
                "id": t.id,
                "title": t.title,
                "type": t.kind,
                "priority": t.priority,
                "due": t.due_at.format("%Y-%m-%d").to_string(),
                "daysUntil": (days_until_due(t, now) * 10.0).round() / 10.0,
            })
        })
        .collect();

    format!(
        "Plan a realistic 7-day study schedule starting today ({today}).\n\
         Tasks: {tasks}\n\n\
         Rules:\n\
         1. weight = priority (HIGH=3, MEDIUM=2, LOW=1) x urgency (1 / days until due); \
         schedule the heaviest tasks first.\n\
         2. Keep each day between 120 and 240 minutes.\n\
         3. NEVER schedule a task after its due date.\n\
         4. Tasks due today or tomorrow get a larger chunk (up to 60 minutes); \
         others are spread in 15-90 minute sessions.\n\
         5. Each day's slot shares sum to 1.0.\n\n\
         {format}",
        today = now.format("%Y-%m-%d"),
        tasks = serde_json::Value::Array(task_list),
        format = WEEKLY_RESPONSE_FORMAT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use studyplan_models::{TaskKind, TaskPriority};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_task_prompt_contains_inputs() {
        let task = WorkItem::new("user-1", "Chemistry", TaskKind::Exam, now() + Duration::days(5))
            .with_priority(TaskPriority::High);
        let prompt = task_plan_prompt(&task, 5);

        assert!(prompt.contains("Task: Chemistry"));
        assert!(prompt.contains("Type: EXAM"));
        assert!(prompt.contains("Priority: HIGH"));
        assert!(prompt.contains("Due Date: 2026-03-07"));
        assert!(prompt.contains("Days Available: 5"));
        assert!(!prompt.contains("User-Provided Subtasks"));
    }

    #[test]
    fn test_task_prompt_lists_user_subtasks() {
        let task = WorkItem::new("user-1", "Essay", TaskKind::Assignment, now() + Duration::days(3))
            .with_subtasks(vec!["Outline".into(), "Draft".into()]);
        let prompt = task_plan_prompt(&task, 3);

        assert!(prompt.contains("User-Provided Subtasks:\n1. Outline\n2. Draft"));
    }

    #[test]
    fn test_weekly_prompt_lists_tasks() {
        let task = WorkItem::new("user-1", "Essay", TaskKind::Assignment, now() + Duration::days(3));
        let prompt = weekly_prompt(&[task.clone()], now());

        assert!(prompt.contains("starting today (2026-03-02)"));
        assert!(prompt.contains(task.id.as_str()));
        assert!(prompt.contains("\"daysUntil\":3.0"));
    }
}
