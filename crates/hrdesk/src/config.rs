//! Configuration management for hrdesk.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::workload::{Workload, DEFAULT_MAX_VACATION_DAYS};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "hrdesk";

/// Default dataset location, relative to the working directory.
const DEFAULT_DATA_PATH: &str = "data/swiss_hr_dataset.csv";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `HRDESK_`, nested with `__`)
/// 2. TOML config file at `~/.config/hrdesk/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Business rule configuration.
    pub rules: RulesConfig,
    /// Entry form configuration.
    pub form: FormConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the dataset file.
    pub data_path: PathBuf,
    /// How long an append waits for another writer, in milliseconds.
    pub lock_timeout_ms: u64,
}

/// Business rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Vacation days granted at a 100% workload.
    pub max_vacation_days: u32,
}

/// Entry form configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Youngest accepted age.
    pub min_age: u32,
    /// Oldest accepted age.
    pub max_age: u32,
    /// Workloads the form offers. Empty accepts any valid workload.
    pub workload_options: Vec<String>,
    /// Only accept cantons and departments already present in the dataset.
    pub restrict_to_known_values: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            lock_timeout_ms: 5_000,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_vacation_days: DEFAULT_MAX_VACATION_DAYS,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            min_age: 16,
            max_age: 100,
            workload_options: default_workload_options(),
            restrict_to_known_values: true,
        }
    }
}

/// Workloads offered by the entry form.
fn default_workload_options() -> Vec<String> {
    ["60%", "70%", "80%", "90%", "100%"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `HRDESK_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("HRDESK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.form.min_age > self.form.max_age {
            return Err(Error::ConfigValidation {
                message: format!(
                    "min_age ({}) cannot be greater than max_age ({})",
                    self.form.min_age, self.form.max_age
                ),
            });
        }

        if self.rules.max_vacation_days == 0 {
            return Err(Error::ConfigValidation {
                message: "max_vacation_days must be greater than 0".to_string(),
            });
        }

        for option in &self.form.workload_options {
            if let Err(err) = Workload::parse(option) {
                return Err(Error::ConfigValidation {
                    message: format!("invalid workload option '{option}': {err}"),
                });
            }
        }

        Ok(())
    }

    /// Get the dataset path.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.storage.data_path.clone()
    }

    /// Get the lock timeout as a Duration.
    #[must_use]
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.storage.lock_timeout_ms)
    }

    /// Parse the configured workload options.
    ///
    /// Options that fail to parse are skipped; [`Config::validate`] rejects
    /// them up front.
    #[must_use]
    pub fn workload_options(&self) -> Vec<Workload> {
        self.form
            .workload_options
            .iter()
            .filter_map(|option| Workload::parse(option).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(
            config.storage.data_path,
            PathBuf::from("data/swiss_hr_dataset.csv")
        );
        assert_eq!(config.rules.max_vacation_days, 25);
        assert!(config.form.restrict_to_known_values);
    }

    #[test]
    fn test_default_form_config() {
        let form = FormConfig::default();

        assert_eq!(form.min_age, 16);
        assert_eq!(form.max_age, 100);
        assert_eq!(
            form.workload_options,
            vec!["60%", "70%", "80%", "90%", "100%"]
        );
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_inverted_age_range() {
        let mut config = Config::default();
        config.form.min_age = 70;
        config.form.max_age = 20;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("min_age"));
    }

    #[test]
    fn test_validate_zero_vacation_days() {
        let mut config = Config::default();
        config.rules.max_vacation_days = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_vacation_days"));
    }

    #[test]
    fn test_validate_invalid_workload_option() {
        let mut config = Config::default();
        config.form.workload_options = vec!["80%".to_string(), "250%".to_string()];

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("250%"));
    }

    #[test]
    fn test_lock_timeout() {
        let config = Config::default();
        assert_eq!(config.lock_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_workload_options_parsed() {
        let config = Config::default();
        let options = config.workload_options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].fraction(), 0.6);
        assert_eq!(options[4], Workload::FULL_TIME);
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("hrdesk"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_path = \"/srv/hr/employees.csv\"\n\n[rules]\nmax_vacation_days = 30\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/srv/hr/employees.csv"));
        assert_eq!(config.rules.max_vacation_days, 30);
        assert_eq!(config.form, FormConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[form]\nmin_age = 90\nmax_age = 18\n").unwrap();

        let result = Config::load_from(Some(path));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("data_path"));
        assert!(json.contains("max_vacation_days"));
        assert!(json.contains("workload_options"));
    }

    #[test]
    fn test_form_config_deserialize() {
        let json = r#"{"min_age": 18, "restrict_to_known_values": false}"#;
        let form: FormConfig = serde_json::from_str(json).unwrap();
        assert_eq!(form.min_age, 18);
        assert_eq!(form.max_age, 100);
        assert!(!form.restrict_to_known_values);
    }
}
