use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_TOTAL_RECORDS: usize = 100;
pub const DEFAULT_LATENCY_MS: u64 = 500;
pub const DEFAULT_SETTINGS_FILE: &str = "dashboard.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {key}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("batch_size must be greater than zero")]
    InvalidBatchSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub batch_size: usize,
    pub total_records: usize,
    pub latency_ms: u64,
    pub seed: Option<u64>,
    pub fail_on_batch: Option<usize>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            total_records: DEFAULT_TOTAL_RECORDS,
            latency_ms: DEFAULT_LATENCY_MS,
            seed: None,
            fail_on_batch: None,
        }
    }
}

impl DashboardSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn validate(self) -> Result<Self, SettingsError> {
        if self.batch_size == 0 {
            return Err(SettingsError::InvalidBatchSize);
        }
        Ok(self)
    }
}

/// Defaults, then the TOML file (an explicit path must exist, the default
/// `dashboard.toml` is optional), then `APP__*` environment overrides.
pub fn load_settings(path: Option<&Path>) -> Result<DashboardSettings, SettingsError> {
    let mut settings = match path {
        Some(path) => read_settings_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_SETTINGS_FILE);
            if default_path.exists() {
                read_settings_file(default_path)?
            } else {
                DashboardSettings::default()
            }
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    settings.validate()
}

fn read_settings_file(path: &Path) -> Result<DashboardSettings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn apply_env_overrides(
    settings: &mut DashboardSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), SettingsError> {
    if let Some(v) = parse_env(&lookup, "APP__BATCH_SIZE")? {
        settings.batch_size = v;
    }
    if let Some(v) = parse_env(&lookup, "APP__TOTAL_RECORDS")? {
        settings.total_records = v;
    }
    if let Some(v) = parse_env(&lookup, "APP__LATENCY_MS")? {
        settings.latency_ms = v;
    }
    if let Some(v) = parse_env(&lookup, "APP__SEED")? {
        settings.seed = Some(v);
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, SettingsError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(SettingsError::InvalidEnv { key, value: raw }),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
