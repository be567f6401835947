//! Configuration management for Vox
//!
//! Loads assistant parameters from `~/.vox/config.json` and overlays the
//! process environment on top.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

pub mod paths;

pub use paths::{config_path, data_dir};

/// Environment variable carrying the completion service credential
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable overriding the completion service base URL
pub const ENV_API_BASE: &str = "OPENAI_API_BASE";
/// Environment variable carrying the response language, used verbatim
pub const ENV_LANGUAGE: &str = "LANG";
/// Environment variable overriding the model identifier
pub const ENV_MODEL: &str = "VOX_MODEL";
/// Environment variable overriding the request timeout in seconds
pub const ENV_TIMEOUT: &str = "VOX_TIMEOUT_SECS";

/// Errors in configuration handling
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Completion service access
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

/// Assistant behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// Response language code such as "en" or "fr"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Whose home the assistant serves, used in the system prompts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            language: None,
            household: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl Config {
    /// Load from the default location, then apply the process environment
    pub async fn load() -> Result<Self> {
        let path = config_path();
        let mut config = Self::load_from(&path).await?;
        config.apply_env()?;
        Ok(config)
    }

    /// Load from a specific location without touching the environment
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("◆ no config at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        debug!("◆ reading config from {:?}", path);
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Overlay values from an arbitrary lookup. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.openai.api_key = key;
        }
        if let Some(base) = get(ENV_API_BASE) {
            self.openai.api_base = Some(base);
        }
        if let Some(language) = get(ENV_LANGUAGE) {
            self.assistant.language = Some(language);
        }
        if let Some(model) = get(ENV_MODEL) {
            self.assistant.model = model;
        }
        if let Some(raw) = get(ENV_TIMEOUT) {
            self.assistant.timeout_secs = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs: &u64| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: ENV_TIMEOUT.to_string(),
                    value: raw.clone(),
                })?;
        }
        Ok(())
    }

    /// Completion service credential, if any
    pub fn api_key(&self) -> Option<String> {
        let key = &self.openai.api_key;
        if key.is_empty() {
            None
        } else {
            Some(key.clone())
        }
    }

    pub fn api_base(&self) -> Option<String> {
        self.openai.api_base.clone().filter(|b| !b.is_empty())
    }

    pub fn model(&self) -> String {
        self.assistant.model.clone()
    }

    pub fn language(&self) -> Option<String> {
        self.assistant.language.clone()
    }

    pub fn household(&self) -> Option<String> {
        self.assistant.household.clone()
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.assistant.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model(), "gpt-4o");
        assert_eq!(config.assistant.timeout_secs, 30);
        assert!(config.api_key().is_none());
        assert!(config.api_base().is_none());
        assert!(config.language().is_none());
    }

    #[test]
    fn test_apply_env_overrides_everything() {
        let mut config = Config::default();
        config
            .apply_env_with(lookup(&[
                (ENV_API_KEY, "sk-test"),
                (ENV_API_BASE, "http://localhost:1234/v1"),
                (ENV_LANGUAGE, "fr"),
                (ENV_MODEL, "gpt-4o-mini"),
                (ENV_TIMEOUT, "5"),
            ]))
            .unwrap();

        assert_eq!(config.api_key(), Some("sk-test".to_string()));
        assert_eq!(config.api_base(), Some("http://localhost:1234/v1".to_string()));
        assert_eq!(config.language(), Some("fr".to_string()));
        assert_eq!(config.model(), "gpt-4o-mini");
        assert_eq!(config.timeout(), std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_apply_env_ignores_empty_values() {
        let mut config = Config::default();
        config.openai.api_key = "from-file".to_string();
        config
            .apply_env_with(lookup(&[(ENV_API_KEY, ""), (ENV_LANGUAGE, "  ")]))
            .unwrap();

        assert_eq!(config.api_key(), Some("from-file".to_string()));
        assert!(config.language().is_none());
    }

    #[test]
    fn test_apply_env_rejects_bad_timeout() {
        let mut config = Config::default();
        let err = config
            .apply_env_with(lookup(&[(ENV_TIMEOUT, "soon")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid value for VOX_TIMEOUT_SECS: soon");
    }

    #[test]
    fn test_apply_env_rejects_zero_timeout() {
        let mut config = Config::default();
        let err = config
            .apply_env_with(lookup(&[(ENV_TIMEOUT, "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref value, .. } if value == "0"));
        assert_eq!(config.assistant.timeout_secs, 30);
    }

    #[test]
    fn test_language_is_kept_verbatim() {
        let mut config = Config::default();
        config
            .apply_env_with(lookup(&[(ENV_LANGUAGE, "en_US.UTF-8")]))
            .unwrap();
        assert_eq!(config.language(), Some("en_US.UTF-8".to_string()));
    }
}
