//! Parsing and validation of generated plans.
//!
//! The generator is asked for JSON, but models sometimes wrap it in
//! Markdown fences or drift from the requested shape. Everything here
//! either yields a well-formed plan or an error that sends the planner to
//! its fallback.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use studyplan_models::{
    DayAllocation, Plan, PlanBlock, Slot, TaskKind, TaskPriority, WeeklyDay, WeeklyTimeline,
    WorkItem,
};

use crate::error::{EngineError, Result};

static FENCE_RE: OnceLock<Regex> = OnceLock::new();

/// Upper bound on the minutes a generated day may hold.
pub const MAX_DAY_MINUTES: u32 = 24 * 60;

/// Sums a day's block minutes, rejecting days longer than a day.
fn checked_day_total(minutes: impl IntoIterator<Item = u32>, date: NaiveDate) -> Result<u32> {
    minutes
        .into_iter()
        .try_fold(0u32, |total, m| {
            total.checked_add(m).filter(|t| *t <= MAX_DAY_MINUTES)
        })
        .ok_or_else(|| {
            EngineError::InvalidShape(format!(
                "{} schedules more than {} minutes",
                date, MAX_DAY_MINUTES
            ))
        })
}

/// Removes a surrounding Markdown code fence, if any.
pub fn strip_code_fences(raw: &str) -> &str {
    let re = FENCE_RE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$").expect("fence pattern is valid")
    });
    match re.captures(raw).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => raw.trim(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedPlan {
    #[serde(default)]
    exam: String,
    total_allocated: Option<u32>,
    #[serde(default)]
    summaries: HashMap<String, String>,
    days: Vec<GeneratedDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedDay {
    date: NaiveDate,
    #[serde(default)]
    tasks: Vec<GeneratedBlock>,
}

#[derive(Debug, Deserialize)]
struct GeneratedBlock {
    text: String,
    #[serde(default)]
    minutes: u32,
}

/// Parses a generated single-task plan.
///
/// Day totals are recomputed from block minutes, and days are sorted by
/// date.
pub fn parse_plan(raw: &str, task: &WorkItem, model: &str) -> Result<Plan> {
    let parsed: GeneratedPlan = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| EngineError::ResponseParse(e.to_string()))?;

    if parsed.exam.trim().is_empty() {
        return Err(EngineError::InvalidShape("missing plan title".to_string()));
    }

    let mut days = parsed
        .days
        .into_iter()
        .map(|day| {
            checked_day_total(day.tasks.iter().map(|b| b.minutes), day.date)?;
            let blocks = day
                .tasks
                .into_iter()
                .map(|b| PlanBlock::new(b.text, b.minutes))
                .collect();
            Ok(DayAllocation::new(day.date, blocks))
        })
        .collect::<Result<Vec<DayAllocation>>>()?;
    days.sort_by_key(|d| d.date);

    let scheduled: u32 = days.iter().map(|d| d.total_minutes).sum();
    let rationale = parsed
        .summaries
        .get(&task.title)
        .or_else(|| parsed.summaries.values().next())
        .cloned()
        .unwrap_or_else(|| format!("Priority: {}. Generated plan.", task.priority));

    Ok(Plan {
        days,
        total_allocated: parsed.total_allocated.unwrap_or(scheduled),
        rationale,
        model: format!("openai:{}", model),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedWeek {
    model: Option<String>,
    days: Vec<GeneratedWeekDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedWeekDay {
    date: NaiveDate,
    #[serde(default)]
    total_minutes: u32,
    #[serde(default)]
    slots: Vec<GeneratedSlot>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedSlot {
    task_id: String,
    #[serde(default)]
    title: String,
    priority: Option<TaskPriority>,
    #[serde(rename = "type")]
    kind: Option<TaskKind>,
    minutes: Option<u32>,
    share: Option<f64>,
}

/// Parses a generated weekly timeline.
///
/// Slots must reference one of `tasks`; unknown task IDs are dropped. Slot
/// minutes missing from the response are derived from the share, and all
/// shares are recomputed from minutes so that each day sums to one.
pub fn parse_week(
    raw: &str,
    tasks: &[WorkItem],
    model: &str,
    now: DateTime<Utc>,
) -> Result<WeeklyTimeline> {
    let parsed: GeneratedWeek = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| EngineError::ResponseParse(e.to_string()))?;

    let by_id: HashMap<&str, &WorkItem> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();

    let mut days = parsed
        .days
        .into_iter()
        .map(|day| {
            let placed: Vec<(&WorkItem, String, u32)> = day
                .slots
                .into_iter()
                .filter_map(|slot| {
                    let Some(task) = by_id.get(slot.task_id.as_str()) else {
                        debug!(task_id = %slot.task_id, "Dropping slot for unknown task");
                        return None;
                    };
                    let minutes = slot.minutes.unwrap_or_else(|| {
                        (slot.share.unwrap_or(0.0) * f64::from(day.total_minutes)).round() as u32
                    });
                    let title = if slot.title.is_empty() {
                        task.title.clone()
                    } else {
                        slot.title
                    };
                    if slot.priority.is_some_and(|p| p != task.priority)
                        || slot.kind.is_some_and(|k| k != task.kind)
                    {
                        debug!(task_id = %task.id, "Generated slot disagrees with task fields");
                    }
                    Some((*task, title, minutes))
                })
                .collect();

            let total_minutes =
                checked_day_total(placed.iter().map(|(_, _, m)| *m), day.date)?.max(1);
            let slots = placed
                .into_iter()
                .map(|(task, title, minutes)| Slot {
                    task_id: task.id.clone(),
                    title,
                    priority: task.priority,
                    kind: task.kind,
                    minutes,
                    share: f64::from(minutes) / f64::from(total_minutes),
                })
                .collect();

            Ok(WeeklyDay {
                date: day.date,
                total_minutes,
                slots,
            })
        })
        .collect::<Result<Vec<WeeklyDay>>>()?;
    days.sort_by_key(|d| d.date);

    Ok(WeeklyTimeline {
        generated_at: now,
        model: parsed
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| model.to_string()),
        total_week_minutes: days.iter().map(|d| d.total_minutes).sum(),
        days,
    })
}
