//! Settings and configuration utilities.
//!
//! This module reads settings from $HOME/.commit-chain/settings.json and uses
//! them as a fallback for environment variables and as defaults for the
//! diagram font.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::graph::DotStyle;

/// Environment variable naming the directory that holds the `dot` executable.
pub const DOT_DIR_VAR: &str = "COMMIT_CHAIN_DOT_DIR";

/// Environment variable naming the diagram font.
pub const FONT_VAR: &str = "COMMIT_CHAIN_FONT";

/// Settings loaded from $HOME/.commit-chain/settings.json.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Environment variable overrides.
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Diagram font family.
    #[serde(default)]
    pub font: Option<String>,
    /// Diagram font size in points.
    #[serde(default)]
    pub font_size: Option<f32>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from the default location, falling back to defaults when
    /// the file cannot be read or parsed.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(error = %format!("{e:#}"), "Ignoring settings");
            Self::default()
        })
    }

    /// Like [`Settings::load_from_path`], but a broken file yields defaults.
    pub fn load_from_path_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_path(path).unwrap_or_else(|e| {
            warn!(error = %format!("{e:#}"), "Ignoring unreadable settings file");
            Self::default()
        })
    }

    /// Loads settings from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Settings>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".commit-chain").join("settings.json"))
    }

    /// Returns an environment variable with fallback to settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(_) => self.env.get(key).cloned(),
        }
    }

    /// Resolves the `dot` directory: the flag wins, then [`DOT_DIR_VAR`].
    pub fn engine_dir(&self, flag: Option<PathBuf>) -> Option<PathBuf> {
        flag.or_else(|| self.get_env_var(DOT_DIR_VAR).map(PathBuf::from))
    }

    /// Resolves the diagram font from flags, [`FONT_VAR`], the settings file
    /// and finally the built-in defaults.
    pub fn dot_style(&self, font: Option<String>, font_size: Option<f32>) -> DotStyle {
        let defaults = DotStyle::default();
        DotStyle {
            font_name: font
                .or_else(|| self.get_env_var(FONT_VAR))
                .or_else(|| self.font.clone())
                .unwrap_or(defaults.font_name),
            font_size: font_size.or(self.font_size).unwrap_or(defaults.font_size),
        }
    }
}
