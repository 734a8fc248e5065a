//! Application settings file (TOML)

use anyhow::{Context, Result};
use marionette_core::{LogConfig, Tuning};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Engine tuning constants
    pub tuning: Tuning,
    /// Logging configuration
    pub log: LogConfig,
}

impl Settings {
    /// Load settings from a TOML file, validating the tuning block.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;
        let settings: Settings = toml::from_str(&text)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))?;
        settings
            .tuning
            .validate()
            .context("Invalid tuning in settings file")?;
        Ok(settings)
    }
}
