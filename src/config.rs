//! Configuration file support
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/cyclecast/config.toml`.
//! Every field is optional and falls back to its default.

use crate::encoder::OutputFormat;
use crate::error::ForecastError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of most recent cycles considered per forecast
pub const DEFAULT_HISTORY_LIMIT: usize = 12;

/// Application configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub forecast: ForecastConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Forecast parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Most recent records considered; 0 disables the limit
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

/// Output rendering
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_format")]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_output_format() -> OutputFormat {
    OutputFormat::JsonPretty
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self, ForecastError> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ForecastError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Default config file path, if a config directory can be resolved
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("cyclecast").join("config.toml"))
    }

    /// Save the configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<(), ForecastError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| ForecastError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// History limit as an option, `None` meaning unlimited
    pub fn history_limit(&self) -> Option<usize> {
        match self.forecast.history_limit {
            0 => None,
            limit => Some(limit),
        }
    }
}
