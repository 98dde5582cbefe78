//! Plan generation with AI-first, deterministic-fallback strategy.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use studyplan_models::{Plan, WeeklyTimeline, WorkItem};

use crate::allocator::{allocate, horizon_days};
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::generator::{GenerationKind, TextGenerator};
use crate::prompts;
use crate::response;
use crate::weekly::allocate_week;

/// Produces plans and weekly timelines.
///
/// Without a generator every call goes straight to the deterministic
/// allocators. With one, each call makes a single generation attempt and
/// falls back on any failure; errors are logged, never returned.
#[derive(Clone)]
pub struct Planner {
    config: PlannerConfig,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Planner {
    /// Creates a planner that only uses the deterministic allocators.
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            generator: None,
        }
    }

    /// Attaches a text generator.
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Returns true if a text generator is configured.
    pub fn is_ai_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Planner limits.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Builds a multi-day plan for `task`.
    pub async fn plan_task(&self, task: &WorkItem, now: DateTime<Utc>) -> Plan {
        if let Some(generator) = &self.generator {
            match self.generate_plan(generator.as_ref(), task, now).await {
                Ok(plan) => {
                    info!(task_id = %task.id, model = %plan.model, days = plan.days.len(), "Generated plan");
                    return plan;
                }
                Err(e) => {
                    warn!(task_id = %task.id, error = %e, "AI plan generation failed, using fallback");
                }
            }
        }

        let plan = allocate(task, now, &self.config);
        info!(task_id = %task.id, model = %plan.model, days = plan.days.len(), "Generated plan");
        plan
    }

    /// Builds a seven-day timeline across `tasks`.
    pub async fn plan_week(&self, tasks: &[WorkItem], now: DateTime<Utc>) -> WeeklyTimeline {
        if let Some(generator) = &self.generator {
            match self.generate_week(generator.as_ref(), tasks, now).await {
                Ok(timeline) => {
                    info!(model = %timeline.model, tasks = tasks.len(), "Generated weekly timeline");
                    return timeline;
                }
                Err(e) => {
                    warn!(error = %e, "AI weekly timeline failed, using fallback");
                }
            }
        }

        let timeline = allocate_week(tasks, now);
        info!(model = %timeline.model, tasks = tasks.len(), "Generated weekly timeline");
        timeline
    }

    async fn generate_plan(
        &self,
        generator: &dyn TextGenerator,
        task: &WorkItem,
        now: DateTime<Utc>,
    ) -> Result<Plan> {
        let horizon = horizon_days(task.due_at, now, self.config.max_ai_horizon_days);
        let prompt = prompts::task_plan_prompt(task, horizon);
        let raw = generator
            .generate(&prompt, prompts::PLAN_SYSTEM_PROMPT, GenerationKind::TaskPlan)
            .await?;
        response::parse_plan(&raw, task, generator.model())
    }

    async fn generate_week(
        &self,
        generator: &dyn TextGenerator,
        tasks: &[WorkItem],
        now: DateTime<Utc>,
    ) -> Result<WeeklyTimeline> {
        let prompt = prompts::weekly_prompt(tasks, now);
        let raw = generator
            .generate(
                &prompt,
                prompts::WEEKLY_SYSTEM_PROMPT,
                GenerationKind::WeeklyTimeline,
            )
            .await?;
        response::parse_week(&raw, tasks, generator.model(), now)
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
