//! # Settings Loader
//!
//! Dataset locations for the holdings dashboard. Each dataset (holdings,
//! fresh buys, sells) is a CSV location, either an absolute URL or a path
//! resolved against `base_url`.
//!
//! Settings come from, in increasing precedence:
//!
//! - built-in defaults
//! - a JSON file (`settings.json` unless a path is given)
//! - environment variables (`HOLDINGS_BASE_URL`, `DATA_CSV_URL`,
//!   `FAVORITES_CSV_URL`, `SELLS_CSV_URL`); empty values are ignored
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! let path = Some(PathBuf::from("config/settings.json"));
//! let settings = settings_loader::load_settings_with_fallback(path.as_ref())?;
//! println!("holdings from {}", settings.holdings_url);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::DatasetKind;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

pub const ENV_BASE_URL: &str = "HOLDINGS_BASE_URL";
pub const ENV_HOLDINGS_URL: &str = "DATA_CSV_URL";
pub const ENV_BUYS_URL: &str = "FAVORITES_CSV_URL";
pub const ENV_SELLS_URL: &str = "SELLS_CSV_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    pub base_url: Option<String>,
    #[serde(alias = "data_csv_url")]
    pub holdings_url: String,
    #[serde(alias = "favorites_csv_url")]
    pub buys_url: String,
    #[serde(alias = "sells_csv_url")]
    pub sells_url: String,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            holdings_url: "data.csv".to_string(),
            buys_url: "Stock_Buy_Nov-25 (1).csv".to_string(),
            sells_url: "Stock_Sell_Nov-25.csv".to_string(),
        }
    }
}

impl DatasetSettings {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.apply_env_overrides();
        settings
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = non_empty(ENV_BASE_URL) {
            self.base_url = Some(v);
        }
        if let Some(v) = non_empty(ENV_HOLDINGS_URL) {
            self.holdings_url = v;
        }
        if let Some(v) = non_empty(ENV_BUYS_URL) {
            self.buys_url = v;
        }
        if let Some(v) = non_empty(ENV_SELLS_URL) {
            self.sells_url = v;
        }
    }

    pub fn url_for(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Holdings => &self.holdings_url,
            DatasetKind::Buys => &self.buys_url,
            DatasetKind::Sells => &self.sells_url,
        }
    }
}

/// Loads settings from a JSON file. Missing keys keep their defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<DatasetSettings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: DatasetSettings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Loads settings from a default location (settings.json in the current directory)
pub fn load_default_settings() -> Result<DatasetSettings> {
    load_settings(DEFAULT_SETTINGS_FILE)
}

/// Loads settings from an optional path, returning None if no path is provided
pub fn load_optional_settings(path: Option<&PathBuf>) -> Result<Option<DatasetSettings>> {
    match path {
        Some(settings_path) => Ok(Some(load_settings(settings_path)?)),
        None => Ok(None),
    }
}

/// Resolves the effective settings: the given file, else `settings.json` if
/// present, else defaults; environment overrides are applied last.
///
/// An explicitly given file that cannot be read or parsed is an error.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<DatasetSettings> {
    let mut settings = match load_optional_settings(path)? {
        Some(s) => s,
        None if settings_file_exists(DEFAULT_SETTINGS_FILE) => load_default_settings()?,
        None => {
            debug!("No settings file, using defaults");
            DatasetSettings::default()
        }
    };
    settings.apply_env_overrides();
    Ok(settings)
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}
