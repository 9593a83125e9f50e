//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the company
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{CompanyConfig, HolidaysConfig};

/// Loads and provides access to the company configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// exposes the resulting [`CompanyConfig`] singleton.
///
/// # Directory Structure
///
/// ```text
/// config/company/
/// ├── company.yaml   # Bonus rules, statutory rates, leave quotas, policy
/// └── holidays.yaml  # Observed public holidays
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/company").unwrap();
/// println!(
///     "Sick-day quota: {} days",
///     loader.config().sick_day_quota
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CompanyConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/company")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let company_path = path.join("company.yaml");
        let mut config = Self::load_yaml::<CompanyConfig>(&company_path)?;

        // Holidays live in their own file so HR can update them without
        // touching statutory rates.
        let holidays_path = path.join("holidays.yaml");
        let holidays = Self::load_yaml::<HolidaysConfig>(&holidays_path)?;
        config.public_holidays = holidays.holidays;

        Ok(Self { config })
    }

    /// Wraps an already-constructed configuration, used by tests and
    /// embedded deployments.
    pub fn from_config(config: CompanyConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded company configuration.
    pub fn config(&self) -> &CompanyConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_load_shipped_config() {
        let loader = ConfigLoader::load("./config/company").unwrap();
        let config = loader.config();

        assert_eq!(config.sso_rate, Decimal::from_str("0.05").unwrap());
        assert_eq!(config.sick_day_quota, 30);
        assert!(!config.public_holidays.is_empty());
        assert_eq!(config.policy.default_break_minutes, 60);
    }

    #[test]
    fn test_shipped_holidays_are_dated() {
        let loader = ConfigLoader::load("./config/company").unwrap();
        let config = loader.config();
        assert!(config.is_public_holiday(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
    }

    #[test]
    fn test_missing_directory_is_config_not_found() {
        let result = ConfigLoader::load("./config/does_not_exist");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_from_config_skips_the_filesystem() {
        let loader = ConfigLoader::load("./config/company").unwrap();
        let wrapped = ConfigLoader::from_config(loader.config().clone());
        assert_eq!(wrapped.config().sick_day_quota, 30);
    }
}
