//! rolemine-agent - Mining orchestration, generation client, settings and reporting.
//!
//! [`MiningOrchestrator`] runs fingerprint clustering over a [`DataContext`]
//! and, when enabled, asks a [`RoleGenerator`] for free-form suggestions that
//! are turned into records by the response interpreter. Any generation
//! failure yields the interpreter's fixed fallback set.
//!
//! [`DataContext`]: rolemine_types::DataContext

mod config;
mod dataset;
mod generation;
mod llm;
mod orchestrator;
mod prompt;
mod report;

pub use config::{
    DEFAULT_API_KEY_ENV, DEFAULT_INFERENCE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
    EffectiveSettings, LlmConfig, LlmSettings, MiningSettings, OLLAMA_DEFAULT_URL,
    RuntimeSettings, load_runtime_settings, load_runtime_settings_from_paths,
    runtime_settings_paths, set_config_home_override,
};
pub use dataset::{DatasetMetadata, load_dataset};
pub use generation::{GenerationError, RoleGenerator};
pub use llm::{ChatMessage, LlmClient};
pub use orchestrator::{MiningOrchestrator, MiningOutcome, SuggestionSource};
pub use prompt::{SYSTEM_PROMPT, build_prompt, format_assignments};
pub use report::{REPORT_HEADER, ReportRow, render_csv};
