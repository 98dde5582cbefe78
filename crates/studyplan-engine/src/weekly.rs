//! Deterministic weekly cross-task allocator.
//!
//! Fills the seven days starting today from all open tasks. Tasks are
//! ranked by priority, urgency and kind, then each day is filled greedily
//! up to a daily cap.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, NaiveTime, Utc};

use studyplan_models::{Slot, TaskKind, WeeklyDay, WeeklyTimeline, WorkItem};

use crate::allocator::raw_days_until;

/// Model tag for timelines produced by the deterministic allocator.
pub const FALLBACK_MODEL: &str = "fallback-humanlike-v1";

/// Number of days in a timeline.
pub const WEEK_DAYS: u32 = 7;

/// Most minutes scheduled on one day.
pub const DAILY_CAP_MINUTES: u32 = 180;

/// A stored timeline younger than this is reused.
pub const WEEKLY_CACHE_WINDOW_MINUTES: i64 = 10;

/// Slots smaller than this are not created.
const MIN_SLOT_MINUTES: u32 = 10;

/// Session size for tasks due within a day.
const URGENT_SESSION_MINUTES: u32 = 60;

const MIN_SESSION_MINUTES: u32 = 15;
const MAX_SESSION_MINUTES: u32 = 90;

/// Days from `now` until the task is due, rounded up and floored at 0.5.
pub fn days_until_due(task: &WorkItem, now: DateTime<Utc>) -> f64 {
    (raw_days_until(task.due_at, now) as f64).max(0.5)
}

/// Scheduling weight: priority x urgency x kind boost.
pub fn task_weight(task: &WorkItem, now: DateTime<Utc>) -> f64 {
    let urgency = 1.0 / days_until_due(task, now);
    let boost = match task.kind {
        TaskKind::Exam => 1.3,
        TaskKind::Assignment => 1.0,
    };
    f64::from(task.priority.as_value()) * urgency * boost
}

/// Minutes the weekly allocator tries to place for a task.
pub fn weekly_budget(task: &WorkItem) -> u32 {
    let per_priority = match task.kind {
        TaskKind::Exam => 90,
        TaskKind::Assignment => 60,
    };
    task.priority.as_value() * per_priority
}

/// Returns true if a timeline generated at `generated_at` can be served
/// again at `now`.
pub fn is_fresh(generated_at: DateTime<Utc>, now: DateTime<Utc>, force: bool) -> bool {
    !force && generated_at > now - Duration::minutes(WEEKLY_CACHE_WINDOW_MINUTES)
}

struct Candidate<'a> {
    task: &'a WorkItem,
    weight: f64,
    days_until: f64,
    remaining: u32,
}

/// Builds a seven-day timeline from `tasks` without any external help.
///
/// Every day is present even when empty; an empty day reports a total of
/// one minute so shares never divide by zero. Within a day, slots appear in
/// weight order.
pub fn allocate_week(tasks: &[WorkItem], now: DateTime<Utc>) -> WeeklyTimeline {
    let today = now.date_naive();

    let mut candidates: Vec<Candidate<'_>> = tasks
        .iter()
        .map(|task| Candidate {
            task,
            weight: task_weight(task, now),
            days_until: days_until_due(task, now),
            remaining: weekly_budget(task),
        })
        .collect();
    // Stable: equal weights keep input order.
    candidates.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));

    let mut days = Vec::with_capacity(WEEK_DAYS as usize);
    for offset in 0..WEEK_DAYS {
        let date = today + Duration::days(i64::from(offset));
        let mut used = 0u32;
        let mut placed: Vec<(&WorkItem, u32)> = Vec::new();

        for candidate in candidates.iter_mut() {
            if candidate.remaining == 0 {
                continue;
            }
            if used >= DAILY_CAP_MINUTES {
                break;
            }

            let due_date = candidate.task.due_at.date_naive();
            if due_date < date {
                continue;
            }

            let cap_left = DAILY_CAP_MINUTES - used;
            let remaining = candidate.remaining;
            let minutes = if due_date == date {
                remaining.min(cap_left)
            } else if candidate.days_until <= 1.0 {
                URGENT_SESSION_MINUTES.min(remaining).min(cap_left)
            } else {
                // Whole days from the start of this day to the due instant
                let day_start = date.and_time(NaiveTime::MIN).and_utc();
                let days_left = raw_days_until(candidate.task.due_at, day_start).max(1) as u32;
                let per_day = remaining.div_ceil(days_left);
                per_day
                    .max(MIN_SESSION_MINUTES)
                    .min(MAX_SESSION_MINUTES)
                    .min(remaining)
                    .min(cap_left)
            };

            if minutes < MIN_SLOT_MINUTES {
                continue;
            }

            candidate.remaining -= minutes;
            used += minutes;
            placed.push((candidate.task, minutes));
        }

        let total_minutes = used.max(1);
        let slots = placed
            .into_iter()
            .map(|(task, minutes)| Slot {
                task_id: task.id.clone(),
                title: task.title.clone(),
                priority: task.priority,
                kind: task.kind,
                minutes,
                share: f64::from(minutes) / f64::from(total_minutes),
            })
            .collect();

        days.push(WeeklyDay {
            date,
            total_minutes,
            slots,
        });
    }

    let total_week_minutes = days.iter().map(|d| d.total_minutes).sum();
    WeeklyTimeline {
        generated_at: now,
        model: FALLBACK_MODEL.to_string(),
        total_week_minutes,
        days,
    }
}
