//! Configuration handling
//!
//! Configuration is read from `config.toml` in the user's config directory
//! (e.g. `~/.config/things-taskpaper/config.toml` on Linux,
//! `~/Library/Application Support/dev.things-taskpaper.things-taskpaper/`
//! on macOS). A missing file means defaults. Command-line flags override
//! every value.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::outline::OutlineOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// User configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Things database to read instead of the default location
    pub database: Option<PathBuf>,

    /// Copy the document to the clipboard instead of printing it
    pub write_to_clipboard: bool,

    /// Sort a project's direct to-dos by index
    pub sort_direct_todos: bool,
}

impl Config {
    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "things-taskpaper", "things-taskpaper")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_dir() {
            Some(dir) => Self::load_from(&dir.join("config.toml")),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file, defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn outline_options(&self) -> OutlineOptions {
        OutlineOptions {
            sort_direct_todos: self.sort_direct_todos,
        }
    }
}
