//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default slider auto-advance interval.
const DEFAULT_SLIDER_INTERVAL_SECS: u64 = 5;

/// Default overview length on movie cards before truncation.
const DEFAULT_DESCRIPTION_LIMIT: usize = 150;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Terminal UI settings.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// API root, e.g. `https://movies.example.com/api/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Terminal UI configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    /// Seconds between featured-slider advances.
    #[serde(default = "default_slider_interval_secs")]
    pub slider_interval_secs: u64,
    /// Characters of overview shown on movie cards.
    #[serde(default = "default_description_limit")]
    pub description_limit: usize,
}

const fn default_slider_interval_secs() -> u64 {
    DEFAULT_SLIDER_INTERVAL_SECS
}

const fn default_description_limit() -> usize {
    DEFAULT_DESCRIPTION_LIMIT
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            slider_interval_secs: DEFAULT_SLIDER_INTERVAL_SECS,
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
        }
    }
}

impl UiConfig {
    /// Slider interval; zero is bumped to one second.
    #[must_use]
    pub fn slider_interval(&self) -> Duration {
        Duration::from_secs(self.slider_interval_secs.max(1))
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}
