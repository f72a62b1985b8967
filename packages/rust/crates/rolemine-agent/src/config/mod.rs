//! Config namespace: runtime settings and generation-service config.

mod llm;
mod settings;

pub use llm::{
    DEFAULT_API_KEY_ENV, DEFAULT_INFERENCE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, LlmConfig,
    OLLAMA_DEFAULT_URL,
};
pub use settings::{
    EffectiveSettings, LlmSettings, MiningSettings, RuntimeSettings, load_runtime_settings,
    load_runtime_settings_from_paths, runtime_settings_paths, set_config_home_override,
};
