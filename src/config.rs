//! Configuration loading and management
//!
//! Handles parsing of `config.toml` in the global data directory.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::resolve::ArchiveFilter;
use crate::storage::DEFAULT_FILE_NAME;

/// Name of the configuration file inside the global data directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// File name of the global store inside the data directory
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Ask before deleting from the command line
    #[serde(default = "default_true")]
    pub confirm_delete: bool,

    /// Browser configuration
    #[serde(default)]
    pub browser: BrowserConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            confirm_delete: default_true(),
            browser: BrowserConfig::default(),
        }
    }
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

/// Which tasks the browser lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Active,
    Archived,
    #[default]
    All,
}

impl ViewMode {
    /// Next mode in the tab cycle
    pub fn next(self) -> Self {
        match self {
            ViewMode::Active => ViewMode::Archived,
            ViewMode::Archived => ViewMode::All,
            ViewMode::All => ViewMode::Active,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Active => "active",
            ViewMode::Archived => "archived",
            ViewMode::All => "all",
        }
    }

    pub fn filter(self) -> ArchiveFilter {
        match self {
            ViewMode::Active => ArchiveFilter::Active,
            ViewMode::Archived => ArchiveFilter::Archived,
            ViewMode::All => ArchiveFilter::Any,
        }
    }
}

/// Browser-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BrowserConfig {
    /// View used by a bare `togo`
    #[serde(default)]
    pub view: ViewMode,

    /// Open with the key help visible
    #[serde(default)]
    pub show_help: bool,
}

impl Config {
    /// Load configuration from a `config.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the data directory, or return defaults
    pub fn load_from_dir(data_dir: &Path) -> Self {
        let config_path = data_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => {
                tracing::debug!(path = %config_path.display(), "loaded config");
                config
            }
            Err(err) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %err,
                    "ignoring invalid config, using defaults"
                );
                Self::default()
            }
        }
    }

    fn validate(&self) -> crate::error::Result<()> {
        let name = self.file_name.as_str();
        if name.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "file_name cannot be empty".to_string(),
            ));
        }
        if name.trim() != name {
            return Err(crate::error::Error::InvalidConfig(format!(
                "file_name '{name}' has leading or trailing whitespace"
            )));
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(crate::error::Error::InvalidConfig(format!(
                "file_name '{name}' must be a plain file name"
            )));
        }
        Ok(())
    }
}
