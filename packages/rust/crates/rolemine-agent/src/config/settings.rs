//! Runtime settings loader for rolemine.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/settings.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/rolemine/settings.yaml`
//!
//! Merge precedence is user over system.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rolemine_types::MiningFilters;
use serde::{Deserialize, Serialize};

use super::llm::LlmConfig;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/settings.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "rolemine/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// Merged contents of the system and user settings files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSettings {
    /// Generation-service section.
    #[serde(default)]
    pub llm: LlmSettings,
    /// Mining defaults section.
    #[serde(default)]
    pub mining: MiningSettings,
}

/// Generation-service endpoint settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmSettings {
    /// Chat completions endpoint.
    pub inference_url: Option<String>,
    /// Model id.
    pub model: Option<String>,
    /// Name of the environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// Request timeout in seconds; `0` means the default.
    pub timeout_secs: Option<u64>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

/// Defaults for mining filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MiningSettings {
    /// Default for [`MiningFilters::min_members_per_role`].
    pub min_members_per_role: Option<usize>,
    /// Default for [`MiningFilters::max_permissions_per_role`].
    pub max_permissions_per_role: Option<usize>,
    /// Default for [`MiningFilters::use_ai`].
    pub use_ai: Option<bool>,
}

/// Settings after defaults and environment overrides are applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveSettings {
    /// Resolved generation-service config.
    pub llm: LlmConfig,
    /// Whether a key was found for a remote endpoint.
    pub api_key_present: bool,
    /// Filters a `mine` run starts from.
    pub mining: MiningFilters,
}

impl RuntimeSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            llm: self.llm.merge(overlay.llm),
            mining: self.mining.merge(overlay.mining),
        }
    }

    /// Generation-service config resolved from the `llm` section.
    #[must_use]
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig::from_settings(&self.llm)
    }

    /// Resolved view printed by `rolemine config`.
    #[must_use]
    pub fn effective(&self) -> EffectiveSettings {
        let llm = self.llm_config();
        EffectiveSettings {
            api_key_present: llm.resolve_api_key().is_some(),
            llm,
            mining: self.mining_filters(),
        }
    }

    /// Mining filters seeded from settings; unset keys keep the built-in defaults.
    #[must_use]
    pub fn mining_filters(&self) -> MiningFilters {
        let defaults = MiningFilters::default();
        MiningFilters {
            min_members_per_role: self
                .mining
                .min_members_per_role
                .unwrap_or(defaults.min_members_per_role),
            max_permissions_per_role: self
                .mining
                .max_permissions_per_role
                .unwrap_or(defaults.max_permissions_per_role),
            use_ai: self.mining.use_ai.unwrap_or(defaults.use_ai),
            ..defaults
        }
    }
}

impl LlmSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            inference_url: overlay.inference_url.or(self.inference_url),
            model: overlay.model.or(self.model),
            api_key_env: overlay.api_key_env.or(self.api_key_env),
            timeout_secs: overlay.timeout_secs.or(self.timeout_secs),
            temperature: overlay.temperature.or(self.temperature),
        }
    }
}

impl MiningSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            min_members_per_role: overlay.min_members_per_role.or(self.min_members_per_role),
            max_permissions_per_role: overlay
                .max_permissions_per_role
                .or(self.max_permissions_per_role),
            use_ai: overlay.use_ai.or(self.use_ai),
        }
    }
}

/// Load merged runtime settings (user overrides system).
#[must_use]
pub fn load_runtime_settings() -> RuntimeSettings {
    let (system_path, user_path) = runtime_settings_paths();
    load_runtime_settings_from_paths(&system_path, &user_path)
}

/// System and user settings file locations.
#[doc(hidden)]
#[must_use]
pub fn runtime_settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

/// Load and merge two explicit settings files.
#[doc(hidden)]
#[must_use]
pub fn load_runtime_settings_from_paths(system: &Path, user: &Path) -> RuntimeSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> RuntimeSettings {
    if !path.exists() {
        return RuntimeSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                event = "settings.read.failed",
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return RuntimeSettings::default();
        }
    };
    match serde_yaml::from_str::<Option<RuntimeSettings>>(&raw) {
        Ok(value) => value.unwrap_or_default(),
        Err(error) => {
            tracing::warn!(
                event = "settings.parse.failed",
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            RuntimeSettings::default()
        }
    }
}

/// Non-empty, trimmed value of an environment variable as a path.
fn env_path(var: &str) -> Option<PathBuf> {
    let value = std::env::var(var).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| PathBuf::from(value))
}

fn project_root() -> PathBuf {
    env_path("PRJ_ROOT")
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Set the config-home override (CLI `--conf`). Only the first call wins;
/// returns whether `path` is the active override afterwards.
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) -> bool {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return false;
    }
    let active = CONFIG_HOME_OVERRIDE.get_or_init(|| path.clone());
    if active != &path {
        tracing::warn!(
            event = "settings.config_home.ignored",
            current = %active.display(),
            ignored = %path.display(),
            "config home override already set"
        );
        return false;
    }
    true
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    let home = CONFIG_HOME_OVERRIDE
        .get()
        .cloned()
        .or_else(|| env_path("PRJ_CONFIG_HOME"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_HOME_RELATIVE_PATH));
    if home.is_absolute() {
        home
    } else {
        project_root.join(home)
    }
}
