//! Configuration handling for the contact book
//!
//! Configuration is stored in `~/.config/contact-book/config.toml` (or the
//! platform equivalent) and can be pointed elsewhere with `--config`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::json::DEFAULT_FILE_NAME;
use crate::domain::DEFAULT_UPCOMING_DAYS;

/// Largest accepted `upcoming_days`
pub const MAX_UPCOMING_DAYS: u32 = 366;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address book file (defaults to the platform data directory)
    pub data_file: Option<PathBuf>,

    /// Days ahead covered by the `birthdays` command (default 7)
    pub upcoming_days: u32,

    /// File with greeting phrases for `hello`, one per line
    pub greetings_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            greetings_file: None,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Reads and validates a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses and validates TOML configuration
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.upcoming_days > MAX_UPCOMING_DAYS {
            return Err(ConfigError::Invalid(format!(
                "upcoming_days must be at most {}, got {}",
                MAX_UPCOMING_DAYS, self.upcoming_days
            )));
        }
        Ok(())
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "contact-book", "contact-book")
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Resolves the address book file
    ///
    /// An explicit override wins, then `data_file`, then the platform data
    /// directory, then `addressbook.json` in the working directory.
    pub fn data_file(&self, override_path: Option<&Path>) -> PathBuf {
        if let Some(path) = override_path {
            return path.to_path_buf();
        }
        if let Some(path) = &self.data_file {
            return path.clone();
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join(DEFAULT_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME))
    }
}
