//! Engine configuration.
//!
//! Configuration is passed in explicitly; nothing in this crate reads the
//! process environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible chat completions endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model for generated plans.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Limits applied by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Longest horizon the deterministic allocator plans for.
    #[serde(default = "default_stub_horizon")]
    pub max_stub_horizon_days: u32,

    /// Longest horizon offered to the text generator.
    #[serde(default = "default_ai_horizon")]
    pub max_ai_horizon_days: u32,
}

fn default_stub_horizon() -> u32 {
    21
}

fn default_ai_horizon() -> u32 {
    28
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_stub_horizon_days: default_stub_horizon(),
            max_ai_horizon_days: default_ai_horizon(),
        }
    }
}

/// Settings for the OpenAI-compatible text generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// API key sent as a bearer token.
    pub api_key: String,

    /// Model identifier (e.g., "gpt-4o-mini").
    #[serde(default = "default_model")]
    pub model: String,

    /// Chat completions endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Token limit for single-task plans.
    #[serde(default = "default_plan_max_tokens")]
    pub plan_max_tokens: u32,

    /// Token limit for weekly timelines.
    #[serde(default = "default_weekly_max_tokens")]
    pub weekly_max_tokens: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    0.4
}

fn default_plan_max_tokens() -> u32 {
    1300
}

fn default_weekly_max_tokens() -> u32 {
    2000
}

fn default_timeout_secs() -> u64 {
    30
}

impl GeneratorConfig {
    /// Creates a configuration with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            plan_max_tokens: default_plan_max_tokens(),
            weekly_max_tokens: default_weekly_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
