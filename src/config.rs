//! Configuration loading and management
//!
//! Handles parsing of `duke.toml` configuration files.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::storage::DEFAULT_DATA_FILE;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "duke.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Task file configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Console shell configuration
    #[serde(default)]
    pub console: ConsoleConfig,
}

/// Task file configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the task file
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

/// Console shell configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Line printed above and below every response
    #[serde(default = "default_divider")]
    pub divider: String,

    /// Show the greeting banner when a chat starts
    #[serde(default = "default_true")]
    pub greeting: bool,

    /// Prompt printed before reading each line
    #[serde(default)]
    pub prompt: String,
}

fn default_divider() -> String {
    "_".repeat(60)
}

fn default_true() -> bool {
    true
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            divider: default_divider(),
            greeting: default_true(),
            prompt: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path` if it exists, or return defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Task file to use, preferring an explicit override
    pub fn data_path(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.storage.path.clone())
    }

    fn validate(&self) -> Result<()> {
        if self.storage.path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "storage.path must not be empty".to_string(),
            ));
        }
        if self.console.divider.contains('\n') {
            return Err(Error::InvalidConfig(
                "console.divider must be a single line".to_string(),
            ));
        }
        Ok(())
    }
}
