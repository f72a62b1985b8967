//! Generation-service configuration: endpoint, model, API key, timeout.

use serde::{Deserialize, Serialize};

use super::settings::LlmSettings;

/// Default chat completions endpoint.
pub const DEFAULT_INFERENCE_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Ollama's OpenAI-compatible endpoint.
pub const OLLAMA_DEFAULT_URL: &str = "http://127.0.0.1:11434/v1/chat/completions";
/// Default model id.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Request timeout applied by the HTTP client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// API key variable consulted when settings name none.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Resolved generation-service config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat completions endpoint (OpenAI, Ollama `/v1`, or a proxy).
    pub inference_url: String,
    /// Model id sent with each request.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
    /// Sampling temperature; the service default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: None,
        }
    }
}

impl LlmConfig {
    /// Build from settings; `ROLEMINE_INFERENCE_URL` and `ROLEMINE_MODEL`
    /// override the file values.
    #[must_use]
    pub fn from_settings(settings: &LlmSettings) -> Self {
        let defaults = Self::default();
        let inference_url = env_value("ROLEMINE_INFERENCE_URL")
            .or_else(|| settings.inference_url.clone())
            .unwrap_or(defaults.inference_url);
        let model = env_value("ROLEMINE_MODEL")
            .or_else(|| settings.model.clone())
            .unwrap_or(defaults.model);
        Self {
            inference_url,
            model,
            api_key_env: settings
                .api_key_env
                .clone()
                .unwrap_or(defaults.api_key_env),
            timeout_secs: settings
                .timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.timeout_secs),
            temperature: settings.temperature,
        }
    }

    /// Whether the endpoint is a local server that needs no key.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.inference_url.contains("127.0.0.1") || self.inference_url.contains("localhost")
    }

    /// API key from the configured variable. Local endpoints get none.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        if self.is_local() {
            return None;
        }
        env_value(&self.api_key_env)
    }

    /// Whether a generation call can be attempted at all.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.is_local() || self.resolve_api_key().is_some()
    }
}

fn env_value(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
