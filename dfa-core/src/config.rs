//! Engine configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via DFA_CONFIG)
//! 3. Environment variables

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// When transition targets are checked against the registered states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// Dangling targets surface only when a run traverses them.
    #[default]
    Lazy,
    /// `run` checks every transition target before traversal begins.
    Eager,
}

impl std::str::FromStr for Validation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lazy" => Ok(Validation::Lazy),
            "eager" => Ok(Validation::Eager),
            other => Err(ConfigError::Validation(format!(
                "unknown validation mode '{}' (expected 'lazy' or 'eager')",
                other
            ))),
        }
    }
}

/// Automaton configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DfaConfig {
    /// Dangling transition handling.
    pub validation: Validation,
    /// Whether a run that runs out of tokens on a non-accepting state counts
    /// as a success.
    pub exhausted_is_success: bool,
}

impl Default for DfaConfig {
    fn default() -> Self {
        Self {
            validation: Validation::Lazy,
            exhausted_is_success: true,
        }
    }
}

impl DfaConfig {
    /// Loads configuration from file, then applies environment variable overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("DFA_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DfaConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        tracing::debug!("Loaded DFA config from {}", path.display());
        Ok(config)
    }

    /// Loads configuration from environment variables only.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies overrides from a variable lookup.
    ///
    /// Recognized keys are `DFA_VALIDATION` (`lazy` or `eager`) and
    /// `DFA_EXHAUSTED_IS_SUCCESS` (`1`/`true` or anything else for false).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("DFA_VALIDATION") {
            self.validation = mode.parse()?;
        }

        if let Some(flag) = lookup("DFA_EXHAUSTED_IS_SUCCESS") {
            self.exhausted_is_success = flag == "1" || flag.to_lowercase() == "true";
        }

        Ok(())
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_exhausted_is_success(mut self, exhausted_is_success: bool) -> Self {
        self.exhausted_is_success = exhausted_is_success;
        self
    }
}
