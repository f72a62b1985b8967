//! LLM client: OpenAI-compatible chat completions.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::generation::{GenerationError, RoleGenerator};

/// One chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }
}

/// Request body for chat completions (OpenAI format).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Response: choices[0].message.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for chat completions.
pub struct LlmClient {
    client: reqwest::Client,
    inference_url: String,
    model: String,
    api_key: Option<String>,
    temperature: Option<f32>,
}

impl LlmClient {
    /// Build a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            inference_url: config.inference_url.clone(),
            model: config.model.clone(),
            api_key: config.resolve_api_key(),
            temperature: config.temperature,
        })
    }

    /// Send messages; returns the first choice's text content.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, an
    /// unparsable body, or a response without text.
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };
        let mut req = self
            .client
            .post(&self.inference_url)
            .json(&body)
            .header("Content-Type", "application/json");
        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {key}"));
        }
        let res = req.send().await?;
        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: text,
            }
            .into());
        }
        let parsed: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| GenerationError::Parse {
                reason: e.to_string(),
                body: text.clone(),
            })?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(GenerationError::NoChoices)?;
        choice
            .message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| GenerationError::EmptyContent.into())
    }
}

#[async_trait]
impl RoleGenerator for LlmClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        self.chat(vec![
            ChatMessage::new("system", system),
            ChatMessage::new("user", prompt),
        ])
        .await
    }
}
