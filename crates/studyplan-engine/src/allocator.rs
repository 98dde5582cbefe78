//! Deterministic single-task allocator.
//!
//! Spreads a task's total effort over the days until it is due. Exams ramp
//! up towards the deadline, assignments are front-loaded. The result is a
//! pure function of the task and `now`.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use studyplan_models::{DayAllocation, Plan, PlanBlock, TaskKind, TaskPriority, WorkItem};

use crate::config::PlannerConfig;

/// Model tag for plans produced by the deterministic allocator.
pub const STUB_MODEL: &str = "stub";

/// Days with fewer minutes than this are dropped from the plan.
pub const MIN_DAY_MINUTES: u32 = 10;

/// Total effort never drops below this many minutes per horizon day.
pub const MIN_MINUTES_PER_HORIZON_DAY: u32 = 30;

/// Minutes at which a day is split between two user subtasks.
const SPLIT_THRESHOLD_MINUTES: u32 = 60;

/// Portion of a split day given to the first subtask.
const SPLIT_FIRST_SHARE: f64 = 0.6;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Number of whole days from `now` until `due_at`, rounded up.
///
/// Negative when the task is overdue.
pub(crate) fn raw_days_until(due_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (due_at - now).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

/// Planning horizon in days: at least 1, at most `cap`.
pub fn horizon_days(due_at: DateTime<Utc>, now: DateTime<Utc>, cap: u32) -> u32 {
    let cap = i64::from(cap.max(1));
    raw_days_until(due_at, now).clamp(1, cap) as u32
}

/// Base effort in minutes for a priority.
fn base_minutes(priority: TaskPriority) -> u32 {
    match priority {
        TaskPriority::Low => 90,
        TaskPriority::Medium => 180,
        TaskPriority::High => 300,
    }
}

/// Total effort in minutes for a task of the given kind and priority
/// planned over `horizon` days.
pub fn total_effort(kind: TaskKind, priority: TaskPriority, horizon: u32) -> u32 {
    let base = f64::from(base_minutes(priority));
    let total = match kind {
        TaskKind::Exam => base + (40.0 * f64::from(horizon).sqrt()).round(),
        TaskKind::Assignment => (base * 0.6).round(),
    };
    (total as u32).max(horizon * MIN_MINUTES_PER_HORIZON_DAY)
}

fn progress(day_index: u32, horizon: u32) -> f64 {
    f64::from(day_index + 1) / f64::from(horizon)
}

/// Unnormalized weight of a day given its progress through the horizon.
fn ramp_weight(kind: TaskKind, progress: f64) -> f64 {
    match kind {
        TaskKind::Exam => progress.powf(1.8),
        TaskKind::Assignment => (1.0 - 0.7 * progress).powf(1.2),
    }
}

/// Minutes per horizon day, before filtering.
fn day_minutes(kind: TaskKind, horizon: u32, total: u32) -> Vec<u32> {
    let weights: Vec<f64> = (0..horizon)
        .map(|i| ramp_weight(kind, progress(i, horizon)))
        .collect();
    let sum: f64 = weights.iter().sum();

    weights
        .iter()
        .map(|w| ((w / sum) * f64::from(total)).round() as u32)
        .collect()
}

/// Label for a day when the user gave no subtasks.
fn synthesized_label(kind: TaskKind, title: &str, progress: f64) -> String {
    match kind {
        TaskKind::Exam if progress < 0.4 => format!("Review core concepts for {}", title),
        TaskKind::Exam if progress < 0.7 => format!("Practice problems for {}", title),
        TaskKind::Exam => format!("Final review and practice for {}", title),
        TaskKind::Assignment if progress < 0.3 => format!("Research and planning for {}", title),
        TaskKind::Assignment if progress < 0.7 => format!("Work on {}", title),
        TaskKind::Assignment => format!("Review and finalize {}", title),
    }
}

/// Blocks for a day drawn from the user's own subtask labels.
fn user_blocks(subtasks: &[String], day_index: u32, minutes: u32) -> Vec<PlanBlock> {
    let index = day_index as usize % subtasks.len();

    if minutes >= SPLIT_THRESHOLD_MINUTES && subtasks.len() > 1 {
        let first = (f64::from(minutes) * SPLIT_FIRST_SHARE).floor() as u32;
        let next = (index + 1) % subtasks.len();
        vec![
            PlanBlock::new(&subtasks[index], first),
            PlanBlock::new(&subtasks[next], minutes - first),
        ]
    } else {
        vec![PlanBlock::new(&subtasks[index], minutes)]
    }
}

fn rationale(task: &WorkItem, total: u32) -> String {
    if task.has_user_subtasks() {
        format!(
            "Priority: {}. Using user-provided subtasks. Total ~{} minutes.",
            task.priority, total
        )
    } else {
        format!(
            "Priority: {}. Recommended total ~{} minutes.",
            task.priority, total
        )
    }
}

fn day_date(now: DateTime<Utc>, day_index: u32) -> NaiveDate {
    (now + Duration::days(i64::from(day_index))).date_naive()
}

/// Builds a multi-day plan for one task without any external help.
///
/// Days whose share rounds below [`MIN_DAY_MINUTES`] are left out, so an
/// overdue task still gets a one-day plan (or an empty one when even that
/// day is too small). `total_allocated` is the budgeted effort; the sum of
/// day minutes may drift from it by rounding.
pub fn allocate(task: &WorkItem, now: DateTime<Utc>, config: &PlannerConfig) -> Plan {
    let horizon = horizon_days(task.due_at, now, config.max_stub_horizon_days);
    let total = total_effort(task.kind, task.priority, horizon);
    let minutes_by_day = day_minutes(task.kind, horizon, total);

    let days = minutes_by_day
        .into_iter()
        .zip(0u32..)
        .filter(|(minutes, _)| *minutes >= MIN_DAY_MINUTES)
        .map(|(minutes, i)| {
            let blocks = if task.has_user_subtasks() {
                user_blocks(&task.subtasks, i, minutes)
            } else {
                let label = synthesized_label(task.kind, &task.title, progress(i, horizon));
                vec![PlanBlock::new(label, minutes)]
            };
            DayAllocation::new(day_date(now, i), blocks)
        })
        .collect();

    Plan {
        days,
        total_allocated: total,
        rationale: rationale(task, total),
        model: STUB_MODEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    fn task(kind: TaskKind, priority: TaskPriority, due_in: Duration) -> WorkItem {
        WorkItem::new("user-1", "Biology", kind, now() + due_in).with_priority(priority)
    }

    #[test]
    fn test_horizon_rounds_up_partial_days() {
        assert_eq!(horizon_days(now() + Duration::hours(25), now(), 21), 2);
        assert_eq!(horizon_days(now() + Duration::days(7), now(), 21), 7);
    }

    #[test]
    fn test_horizon_is_at_least_one() {
        assert_eq!(horizon_days(now(), now(), 21), 1);
        assert_eq!(horizon_days(now() - Duration::days(3), now(), 21), 1);
    }

    #[test]
    fn test_horizon_is_capped() {
        assert_eq!(horizon_days(now() + Duration::days(60), now(), 21), 21);
        assert_eq!(horizon_days(now() + Duration::days(60), now(), 28), 28);
    }

    #[test]
    fn test_total_effort_exam() {
        // 300 + round(40 * sqrt(7)) = 300 + 106
        assert_eq!(total_effort(TaskKind::Exam, TaskPriority::High, 7), 406);
        assert_eq!(total_effort(TaskKind::Exam, TaskPriority::Low, 1), 130);
    }

    #[test]
    fn test_total_effort_assignment_scales_base() {
        assert_eq!(total_effort(TaskKind::Assignment, TaskPriority::High, 1), 180);
        assert_eq!(total_effort(TaskKind::Assignment, TaskPriority::Medium, 1), 108);
    }

    #[test]
    fn test_total_effort_floor() {
        // round(90 * 0.6) = 54 < 2 * 30
        assert_eq!(total_effort(TaskKind::Assignment, TaskPriority::Low, 2), 60);
        assert_eq!(total_effort(TaskKind::Assignment, TaskPriority::Low, 21), 630);
    }

    #[test]
    fn test_exam_is_back_loaded() {
        let minutes = day_minutes(TaskKind::Exam, 7, 406);
        assert!(minutes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_assignment_is_front_loaded() {
        let minutes = day_minutes(TaskKind::Assignment, 5, 300);
        assert!(minutes.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_synthesized_labels() {
        assert_eq!(
            synthesized_label(TaskKind::Exam, "Bio", 0.2),
            "Review core concepts for Bio"
        );
        assert_eq!(
            synthesized_label(TaskKind::Exam, "Bio", 0.5),
            "Practice problems for Bio"
        );
        assert_eq!(
            synthesized_label(TaskKind::Exam, "Bio", 1.0),
            "Final review and practice for Bio"
        );
        assert_eq!(
            synthesized_label(TaskKind::Assignment, "Essay", 0.1),
            "Research and planning for Essay"
        );
        assert_eq!(synthesized_label(TaskKind::Assignment, "Essay", 0.5), "Work on Essay");
        assert_eq!(
            synthesized_label(TaskKind::Assignment, "Essay", 0.9),
            "Review and finalize Essay"
        );
    }

    #[test]
    fn test_user_blocks_rotate_and_split() {
        let subtasks = vec!["Read".to_string(), "Outline".to_string(), "Draft".to_string()];

        let blocks = user_blocks(&subtasks, 4, 40);
        assert_eq!(blocks, vec![PlanBlock::new("Outline", 40)]);

        let blocks = user_blocks(&subtasks, 2, 75);
        assert_eq!(
            blocks,
            vec![PlanBlock::new("Draft", 45), PlanBlock::new("Read", 30)]
        );
    }

    #[test]
    fn test_single_user_subtask_is_never_split() {
        let subtasks = vec!["Read".to_string()];
        let blocks = user_blocks(&subtasks, 3, 120);
        assert_eq!(blocks, vec![PlanBlock::new("Read", 120)]);
    }

    #[test]
    fn test_high_exam_due_in_week() {
        let task = task(TaskKind::Exam, TaskPriority::High, Duration::days(7));
        let plan = allocate(&task, now(), &PlannerConfig::default());

        assert_eq!(plan.total_allocated, 406);
        assert_eq!(plan.model, STUB_MODEL);
        assert_eq!(plan.rationale, "Priority: HIGH. Recommended total ~406 minutes.");

        // Day 0 gets ~4 minutes and is dropped.
        assert_eq!(plan.days.len(), 6);
        assert_eq!(plan.days[0].date, day_date(now(), 1));
        assert_eq!(plan.days[0].blocks[0].label, "Review core concepts for Biology");
        assert_eq!(plan.days[1].blocks[0].label, "Practice problems for Biology");
        assert_eq!(
            plan.days.last().unwrap().blocks[0].label,
            "Final review and practice for Biology"
        );

        let scheduled = plan.scheduled_minutes();
        assert!((400..=410).contains(&scheduled), "scheduled {}", scheduled);
    }

    #[test]
    fn test_low_assignment_due_in_two_days() {
        let task = task(TaskKind::Assignment, TaskPriority::Low, Duration::days(2));
        let plan = allocate(&task, now(), &PlannerConfig::default());

        assert_eq!(plan.total_allocated, 60);
        assert_eq!(plan.days.len(), 2);
        assert!(plan.days[0].total_minutes > plan.days[1].total_minutes);
        assert_eq!(plan.days[0].total_minutes, 43);
        assert_eq!(plan.days[1].total_minutes, 17);
        assert_eq!(plan.days[0].blocks[0].label, "Work on Biology");
        assert_eq!(plan.days[1].blocks[0].label, "Review and finalize Biology");
    }

    #[test]
    fn test_overdue_task_gets_single_day() {
        let task = task(TaskKind::Exam, TaskPriority::Medium, -Duration::days(2));
        let plan = allocate(&task, now(), &PlannerConfig::default());

        assert_eq!(plan.days.len(), 1);
        assert_eq!(plan.days[0].date, now().date_naive());
        assert_eq!(plan.days[0].total_minutes, plan.total_allocated);
    }

    #[test]
    fn test_user_subtasks_plan() {
        let task = task(TaskKind::Assignment, TaskPriority::High, Duration::days(3))
            .with_subtasks(vec!["Research".into(), "Write".into()]);
        let plan = allocate(&task, now(), &PlannerConfig::default());

        assert!(plan.rationale.contains("Using user-provided subtasks"));
        for day in &plan.days {
            for block in &day.blocks {
                assert!(block.label == "Research" || block.label == "Write");
            }
            let sum: u32 = day.blocks.iter().map(|b| b.minutes).sum();
            assert_eq!(sum, day.total_minutes);
        }
        assert_eq!(plan.days[0].blocks[0].label, "Research");
        assert_eq!(plan.days[0].blocks.len(), 2);
    }

    #[test]
    fn test_deterministic_output() {
        let task = task(TaskKind::Exam, TaskPriority::Medium, Duration::days(12));
        let first = allocate(&task, now(), &PlannerConfig::default());
        let second = allocate(&task, now(), &PlannerConfig::default());

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
