//! Settings for the generated-content providers.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_QUESTION_MODEL,
    DEFAULT_VISUAL_MODEL,
};

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const API_KEY_ALIAS_VAR: &str = "API_KEY";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const QUESTION_MODEL_VAR: &str = "GEMINI_QUESTION_MODEL";
pub const VISUAL_MODEL_VAR: &str = "GEMINI_VISUAL_MODEL";
pub const TIMEOUT_VAR: &str = "GEMINI_TIMEOUT_SECS";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key configured; set {key} (or {alias})", key = API_KEY_VAR, alias = API_KEY_ALIAS_VAR)]
    MissingApiKey,
    #[error("{var} must be a whole number of seconds, got '{value}'")]
    InvalidTimeout { var: &'static str, value: String },
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
    pub question_model: String,
    pub visual_model: String,
    pub timeout_secs: u64,
}

// Keep the key out of logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("question_model", &self.question_model)
            .field("visual_model", &self.visual_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    /// Defaults for everything but the key.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            question_model: DEFAULT_QUESTION_MODEL.to_string(),
            visual_model: DEFAULT_VISUAL_MODEL.to_string(),
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
        }
    }

    /// Read the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when neither key variable is set,
    /// and [`ConfigError::InvalidTimeout`] when the timeout does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read values baked in at compile time, for targets without a process
    /// environment.
    ///
    /// # Errors
    ///
    /// Same as [`ProviderConfig::from_env`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| {
            let value = match var {
                API_KEY_VAR => option_env!("GEMINI_API_KEY"),
                API_KEY_ALIAS_VAR => option_env!("API_KEY"),
                BASE_URL_VAR => option_env!("GEMINI_BASE_URL"),
                QUESTION_MODEL_VAR => option_env!("GEMINI_QUESTION_MODEL"),
                VISUAL_MODEL_VAR => option_env!("GEMINI_VISUAL_MODEL"),
                TIMEOUT_VAR => option_env!("GEMINI_TIMEOUT_SECS"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Build from any variable lookup. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Same as [`ProviderConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let api_key = get(API_KEY_VAR)
            .or_else(|| get(API_KEY_ALIAS_VAR))
            .ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::with_api_key(api_key);
        if let Some(base_url) = get(BASE_URL_VAR) {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(model) = get(QUESTION_MODEL_VAR) {
            config.question_model = model;
        }
        if let Some(model) = get(VISUAL_MODEL_VAR) {
            config.visual_model = model;
        }
        if let Some(value) = get(TIMEOUT_VAR) {
            config.timeout_secs = value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout {
                    var: TIMEOUT_VAR,
                    value,
                })?;
        }
        Ok(config)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
