//! OpenAI-compatible chat completions client.
//!
//! Implements [`TextGenerator`] on top of any endpoint that speaks the
//! `/v1/chat/completions` protocol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::GeneratorConfig;
use crate::error::{EngineError, Result};
use crate::generator::{GenerationKind, TextGenerator};

/// Chat completions client used for AI-backed plans.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    config: GeneratorConfig,
}

impl OpenAiClient {
    /// Create a new client from configuration.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(EngineError::Configuration("empty API key".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| EngineError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Send a chat completion request.
    pub async fn chat(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> Result<ChatResponse> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: Some(max_tokens),
            temperature: Some(self.config.temperature),
        };

        trace!("Sending chat request: {:?}", request);

        let response = self
            .client
            .post(&self.config.base_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::Generation(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(EngineError::Generation(format!(
                "API error {}: {}",
                status, text
            )));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| EngineError::ResponseParse(format!("Failed to parse response: {}", e)))?;

        debug!(
            "Chat response received: {} tokens used",
            response.usage.as_ref().map_or(0, |u| u.total_tokens)
        );

        Ok(response)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str, system: &str, kind: GenerationKind) -> Result<String> {
        let max_tokens = match kind {
            GenerationKind::TaskPlan => self.config.plan_max_tokens,
            GenerationKind::WeeklyTimeline => self.config.weekly_max_tokens,
        };
        let messages = vec![ChatMessage::system(system), ChatMessage::user(prompt)];
        let response = self.chat(messages, max_tokens).await?;

        response
            .content()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| EngineError::Generation("empty response".to_string()))
    }
}

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,

    /// Conversation messages.
    pub messages: Vec<ChatMessage>,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Temperature for generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A message in the chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender.
    pub role: String,

    /// Text content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Unique identifier for this completion.
    #[serde(default)]
    pub id: String,

    /// Completion choices.
    pub choices: Vec<ChatChoice>,

    /// Token usage information.
    pub usage: Option<ChatUsage>,
}

impl ChatResponse {
    /// Text of the first choice, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

/// A choice in the completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// Index of this choice.
    pub index: u32,

    /// The message for this choice.
    pub message: ResponseMessage,

    /// Finish reason (stop, length, etc.).
    pub finish_reason: Option<String>,
}

/// Message in a completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Role (always "assistant" for responses).
    pub role: String,

    /// Text content of the response.
    pub content: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,

    /// Tokens in the completion.
    pub completion_tokens: u32,

    /// Total tokens used.
    pub total_tokens: u32,
}
