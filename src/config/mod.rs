//! Engine configuration: fallback currency, default analysis window, and a
//! JSON-backed manager for persisting user preferences.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::app_data_dir;

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Stores engine-level preferences consumed by the insight services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Fallback ISO 4217 code used when a user has no active account.
    #[serde(default = "InsightConfig::default_base_currency")]
    pub base_currency: String,
    /// Trailing window, in whole calendar months, for overview and health
    /// computations.
    #[serde(default = "InsightConfig::default_window")]
    pub default_window_months: u32,
    /// Optional custom root directory for persisted configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_root: Option<PathBuf>,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            base_currency: Self::default_base_currency(),
            default_window_months: Self::default_window(),
            data_root: None,
        }
    }
}

impl InsightConfig {
    pub fn default_base_currency() -> String {
        "USD".into()
    }

    pub fn default_window() -> u32 {
        12
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        self.data_root.clone().unwrap_or_else(app_data_dir)
    }
}

/// Handles persistence for [`InsightConfig`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(CONFIG_FILE)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<InsightConfig, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(InsightConfig::default())
        }
    }

    pub fn save(&self, config: &InsightConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
