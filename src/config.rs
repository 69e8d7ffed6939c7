//! Configuration loaded from `config.toml`.
//!
//! Every key is optional; missing sections fall back to defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::calculator::OperatorAfterResult;
use crate::input::DeleteAction;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub display: DisplayConfig,
    pub editor: EditorConfig,
    pub keys: KeysConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// How long an error stays on screen, in milliseconds.
    pub error_hold_ms: u64,
    /// Text shown when evaluation fails.
    pub error_text: String,
    /// Append the error description to `error_text`.
    pub descriptive_errors: bool,
    /// Group result digits with thousand separators.
    pub group_digits: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            error_hold_ms: 1500,
            error_text: "Error".to_string(),
            descriptive_errors: false,
            group_digits: false,
        }
    }
}

impl DisplayConfig {
    pub fn error_hold(&self) -> Duration {
        Duration::from_millis(self.error_hold_ms)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub operator_after_result: OperatorAfterResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeysConfig {
    pub delete: DeleteAction,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Number of past calculations to keep; 0 disables the history.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `CALCPAD_CONFIG` or the user
    /// config directory is tried, and a missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match resolve_config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Resolve the configuration file path.
///
/// `CALCPAD_CONFIG` wins; otherwise `<config dir>/calcpad/config.toml`.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CALCPAD_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("calcpad").join("config.toml"))
}
