//! Configuration file loading and default paths

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flags::FeatureFlags;

/// Errors from loading the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(String),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Process configuration, read once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubConfig {
    /// Where the state snapshot lives
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Flag defaults applied when no saved state exists. These are also
    /// what `reset_all` restores.
    #[serde(default)]
    pub flags: FeatureFlags,
}

fn default_data_file() -> PathBuf {
    data_dir().join("state.json")
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            flags: FeatureFlags::default(),
        }
    }
}

impl ClubConfig {
    /// Load from a TOML file
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content =
            std::fs::read_to_string(&path).map_err(|e| ConfigError::Read(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = default_config_path();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// The clubhouse config directory.
///
/// Returns `$XDG_CONFIG_HOME/clubhouse` if set, otherwise
/// `~/.config/clubhouse`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("clubhouse")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/clubhouse")
    } else {
        PathBuf::from(".config/clubhouse")
    }
}

/// The clubhouse data directory.
///
/// Returns `$XDG_DATA_HOME/clubhouse` if set, otherwise
/// `~/.local/share/clubhouse`. This is where the state snapshot is stored.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("clubhouse")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/clubhouse")
    } else {
        PathBuf::from(".local/share/clubhouse")
    }
}

/// Default config file location
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}
