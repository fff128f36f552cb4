//! # Settings Module
//!
//! ## Purpose
//! Keeps the runtime configuration of ElectroBase in one JSON file instead of hardcoded
//! paths: which store backend to use, where the database file lives and how much to log.
//!
//! ## Architecture
//! - **DbConfig**: serializable configuration structure
//! - **SettingsManager**: loads, validates, updates and saves the configuration
//! - **Configuration File**: `electrobase_config.json` in the working directory by default
//!
//! ## Configuration Format
//! ```json
//! {
//!   "store": "json",
//!   "database_file": "electrolyte_db.json",
//!   "log_level": "info",
//!   "log_file": null
//! }
//! ```
//!
//! ## Usage
//! ```rust
//! use ElectroBase::settings::SettingsManager;
//!
//! let mut manager = SettingsManager::with_config_file("no_such_config.json");
//! assert_eq!(manager.config().store, "json");
//! manager.set_store("memory").unwrap();
//! assert!(manager.set_log_level("loud").is_err());
//! ```

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "electrobase_config.json";

const STORES: [&str; 2] = ["json", "memory"];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot access configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown store '{0}', expected one of: json, memory")]
    UnknownStore(String),
    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

/// Configuration of the database and of logging.
///
/// # Fields
/// * `store` - backend name, "json" (file database) or "memory" (nothing persisted)
/// * `database_file` - path of the JSON database used by the "json" backend
/// * `log_level` - terminal log level: off, error, warn, info, debug or trace
/// * `log_file` - optional file receiving a copy of the log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub store: String,
    pub database_file: String,
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            store: "json".to_string(),
            database_file: "electrolyte_db.json".to_string(),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl DbConfig {
    pub fn log_level_filter(&self) -> Result<LevelFilter, SettingsError> {
        parse_level(&self.log_level)
    }
}

fn parse_level(level: &str) -> Result<LevelFilter, SettingsError> {
    level
        .parse::<LevelFilter>()
        .map_err(|_| SettingsError::UnknownLogLevel(level.to_string()))
}

/// Loads and persists [`DbConfig`].
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: DbConfig,
    config_file: String,
}

impl SettingsManager {
    /// Loads "electrobase_config.json" from the current directory. A missing or broken
    /// file gives the default configuration.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    pub fn with_config_file(config_file: &str) -> Self {
        let config = Self::load_config(config_file).unwrap_or_default();
        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    /// Strict loading: a missing file gives defaults, an unreadable or invalid one an error.
    pub fn load_config(config_file: &str) -> Result<DbConfig, SettingsError> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: DbConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(DbConfig::default())
        }
    }

    pub fn save_config(&self) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_file, content)?;
        Ok(())
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    pub fn set_store(&mut self, store: &str) -> Result<(), SettingsError> {
        if !STORES.contains(&store) {
            return Err(SettingsError::UnknownStore(store.to_string()));
        }
        self.config.store = store.to_string();
        Ok(())
    }

    pub fn set_database_file(&mut self, database_file: &str) {
        self.config.database_file = database_file.to_string();
    }

    pub fn set_log_level(&mut self, level: &str) -> Result<(), SettingsError> {
        parse_level(level)?;
        self.config.log_level = level.to_lowercase();
        Ok(())
    }

    pub fn set_log_file(&mut self, log_file: Option<&str>) {
        self.config.log_file = log_file.map(|f| f.to_string());
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), SettingsError> {
        self.config = DbConfig::default();
        self.save_config()
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let manager = SettingsManager::with_config_file("definitely_missing_config.json");
        assert_eq!(manager.config(), &DbConfig::default());
        assert_eq!(manager.config().database_file, "electrolyte_db.json");
        assert_eq!(
            manager.config().log_level_filter().unwrap(),
            LevelFilter::Info
        );
    }

    #[test]
    fn test_load_partial_config() {
        let mut temp_config = NamedTempFile::new().unwrap();
        temp_config
            .write_all(br#"{ "store": "memory", "log_level": "debug" }"#)
            .unwrap();
        let manager = SettingsManager::with_config_file(temp_config.path().to_str().unwrap());
        assert_eq!(manager.config().store, "memory");
        assert_eq!(manager.config().database_file, "electrolyte_db.json");
        assert_eq!(
            manager.config().log_level_filter().unwrap(),
            LevelFilter::Debug
        );
    }

    #[test]
    fn test_invalid_config_is_an_error_when_loaded_strictly() {
        let mut temp_config = NamedTempFile::new().unwrap();
        temp_config.write_all(b"[1, 2").unwrap();
        let path = temp_config.path().to_str().unwrap();
        assert!(matches!(
            SettingsManager::load_config(path),
            Err(SettingsError::Json(_))
        ));
        let manager = SettingsManager::with_config_file(path);
        assert_eq!(manager.config(), &DbConfig::default());
    }

    #[test]
    fn test_update_and_save() {
        let temp_config = NamedTempFile::new().unwrap();
        let path = temp_config.path().to_str().unwrap();
        let mut manager = SettingsManager::with_config_file(path);
        manager.set_store("memory").unwrap();
        manager.set_database_file("other_db.json");
        manager.set_log_level("WARN").unwrap();
        manager.set_log_file(Some("electrobase.log"));
        manager.save_config().unwrap();

        let reloaded = SettingsManager::with_config_file(path);
        assert_eq!(reloaded.config().store, "memory");
        assert_eq!(reloaded.config().database_file, "other_db.json");
        assert_eq!(reloaded.config().log_level, "warn");
        assert_eq!(reloaded.config().log_file.as_deref(), Some("electrobase.log"));

        let mut reloaded = reloaded;
        reloaded.reset_to_defaults().unwrap();
        let again = SettingsManager::with_config_file(path);
        assert_eq!(again.config(), &DbConfig::default());
    }

    #[test]
    fn test_validation() {
        let mut manager = SettingsManager::with_config_file("definitely_missing_config.json");
        assert!(matches!(
            manager.set_store("sqlite"),
            Err(SettingsError::UnknownStore(_))
        ));
        assert!(matches!(
            manager.set_log_level("loud"),
            Err(SettingsError::UnknownLogLevel(_))
        ));
        assert_eq!(manager.config(), &DbConfig::default());
    }
}
