use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// `~/.config/trivia/config.toml` on Linux, the platform equivalent
    /// elsewhere via `dirs::config_dir()`, or the current directory when no
    /// config dir is known.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("trivia").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The API base URL is not empty
    /// - `min_delay_ms` is non-zero and not larger than `max_delay_ms`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "api.base_url must not be empty".to_string(),
            });
        }

        let retry = &self.retry;
        if retry.min_delay_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "retry.min_delay_ms must be greater than zero".to_string(),
            });
        }
        if retry.min_delay_ms > retry.max_delay_ms {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "retry.min_delay_ms ({}) exceeds retry.max_delay_ms ({})",
                    retry.min_delay_ms, retry.max_delay_ms
                ),
            });
        }

        Ok(())
    }
}
