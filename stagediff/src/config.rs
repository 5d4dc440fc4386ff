//! Configuration loading for stagediff.
//!
//! Supports loading configuration from TOML files, with sensible defaults
//! for all settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for stagediff.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The two benchmark runs being compared.
    pub runs: RunsConfig,
    /// Report rendering settings.
    pub report: ReportConfig,
}

/// Locations and labels of the two runs under comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunsConfig {
    /// Raw CSV output of the synchronous-path run.
    pub sync_csv: PathBuf,
    /// Raw CSV output of the asynchronous-path run.
    pub async_csv: PathBuf,
    /// Display label for the synchronous path.
    pub sync_label: String,
    /// Display label for the asynchronous path.
    pub async_label: String,
}

/// Settings for report rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Where the HTML report is written.
    pub html_output: PathBuf,
    /// Sync p95 (ms) above which a stage is flagged WARNING.
    pub warn_threshold_ms: f64,
    /// Sync p95 (ms) above which a stage is flagged CRITICAL.
    pub critical_threshold_ms: f64,
}

impl Default for RunsConfig {
    fn default() -> Self {
        Self {
            sync_csv: PathBuf::from("k6/sync_raw.csv"),
            async_csv: PathBuf::from("k6/async_raw.csv"),
            sync_label: "Sync".to_string(),
            async_label: "Async".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            html_output: PathBuf::from("results/report.html"),
            warn_threshold_ms: 2000.0,
            critical_threshold_ms: 5000.0,
        }
    }
}

/// Default configuration file name.
const DEFAULT_CONFIG_FILE: &str = ".stagediff.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from the default file (`.stagediff.toml`) or use
    /// defaults.
    ///
    /// Searches the current directory; a missing file yields the default
    /// configuration, while a file that exists but cannot be parsed is an
    /// error.
    pub fn load_or_default() -> Result<Config> {
        let path = Path::new(DEFAULT_CONFIG_FILE);

        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from the specified path, or try default locations.
    pub fn load_from(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(p) => Self::load(p),
            None => Self::load_or_default(),
        }
    }
}
