//! User configuration and preferences

use crate::domain::TransferMode;
use crate::error::{PswpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfig {
    /// Whether the welcome dialog has been shown
    pub welcome_shown: bool,
    /// Destination for kept photos
    pub keep_dir: Option<PathBuf>,
    /// Destination for discarded photos
    pub discard_dir: Option<PathBuf>,
    pub mode: Option<TransferMode>,
    pub include_ambiguous_raws: Option<bool>,
}

impl UserConfig {
    /// Get the config file path (~/.config/pswp/config.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pswp").join("config.json"))
    }

    /// Load config from file, or create default if doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or_else(|| {
            PswpError::ConfigError("Could not determine config directory".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            PswpError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| {
            PswpError::ConfigError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            PswpError::ConfigError("Could not determine config directory".to_string())
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PswpError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            PswpError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, contents).map_err(|e| {
            PswpError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }
}
