use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ShinkaiError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub retry_delay_ms: u64,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub db_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl AppConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, ShinkaiError> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, merged over built-in defaults. A missing file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ShinkaiError> {
        let mut merged: toml::Table =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| ShinkaiError::Config(e.to_string()))?;

        if path.exists() {
            let user_str = std::fs::read_to_string(path)?;
            let user: toml::Table = toml::from_str(&user_str)
                .map_err(|e| ShinkaiError::Config(format!("{}: {e}", path.display())))?;
            merge_tables(&mut merged, user);
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| ShinkaiError::Config(e.to_string()))
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), ShinkaiError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ShinkaiError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ShinkaiError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Default path to the database file.
    pub fn db_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().join("shinkai.db"))
            .unwrap_or_else(|| PathBuf::from("shinkai.db"))
    }

    /// Directory for rolling log files.
    pub fn log_dir() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    /// Database path for this config: `storage.db_file` if set, else
    /// [`AppConfig::db_path`].
    pub fn resolved_db_path(&self) -> PathBuf {
        if self.storage.db_file.trim().is_empty() {
            Self::db_path()
        } else {
            PathBuf::from(&self.storage.db_file)
        }
    }

    /// Ensure the parent directory of `path` exists.
    pub fn ensure_parent(path: &Path) -> Result<(), ShinkaiError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "shinkai")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

/// Recursively overlay `overlay` onto `base`; nested tables merge, other
/// values replace.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(over_table) => match base.get_mut(&key) {
                Some(toml::Value::Table(base_table)) => merge_tables(base_table, over_table),
                _ => {
                    base.insert(key, toml::Value::Table(over_table));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}
