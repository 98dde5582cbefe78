//! Text generation capability.

use async_trait::async_trait;

use crate::error::Result;

/// Which budget a generation request should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    /// A multi-day plan for one task.
    TaskPlan,
    /// A seven-day timeline across tasks.
    WeeklyTimeline,
}

/// A fallible source of generated text.
///
/// Implementations make a single attempt per call. The planner never
/// retries; any error sends it to the deterministic allocators.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier reported in generated results.
    fn model(&self) -> &str;

    /// Generate a completion for `prompt` under the given system instruction.
    async fn generate(&self, prompt: &str, system: &str, kind: GenerationKind) -> Result<String>;
}
