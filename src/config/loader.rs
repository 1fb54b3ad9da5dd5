//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading jurisdiction
//! metadata and dated statutory rate tables from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::calculation::StatutoryRates;
use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, JurisdictionMetadata, RateConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/india/
/// ├── engine.yaml          # Jurisdiction metadata
/// └── rates/
///     ├── 2017-01-01.yaml  # Statutory rates effective from this date
///     └── 2019-07-01.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use ctc_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/india").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let rates = loader.rates_for(date).unwrap();
/// println!("PF ceiling: {}", rates.pf_wage_ceiling);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if `engine.yaml` or the `rates` directory is
    ///   missing, or `rates` holds no YAML files
    /// - `ConfigParseError` if any file contains invalid YAML
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("engine.yaml"))?;
        let rates = Self::load_rates(&path.join("rates"))?;

        Ok(Self {
            config: EngineConfig::new(metadata, rates),
        })
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

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<RateConfig>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        self.config.metadata()
    }

    /// Returns the statutory rates effective on `date`: the most recent
    /// table whose effective date is on or before it.
    pub fn rates_for(&self, date: NaiveDate) -> EngineResult<&StatutoryRates> {
        self.config
            .rates()
            .iter()
            .rev()
            .find(|rc| rc.effective_date <= date)
            .map(|rc| &rc.statutory)
            .ok_or(EngineError::RatesNotFound { date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/india"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().code, "IN");
        assert_eq!(loader.metadata().currency, "INR");
    }

    #[test]
    fn test_rates_for_current_date_match_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();

        let rates = loader.rates_for(date).unwrap();
        assert_eq!(*rates, StatutoryRates::default());
    }

    #[test]
    fn test_rates_for_older_date_uses_older_table() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();

        let rates = loader.rates_for(date).unwrap();
        assert_eq!(rates.esi_employee_rate, dec("0.0175"));
        assert_eq!(rates.esi_employer_rate, dec("0.0475"));
    }

    #[test]
    fn test_rates_for_boundary_date_is_inclusive() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2019, 7, 1).unwrap();

        let rates = loader.rates_for(date).unwrap();
        assert_eq!(rates.esi_employer_rate, dec("0.0325"));
    }

    #[test]
    fn test_rates_not_found_before_first_table() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();

        match loader.rates_for(date) {
            Err(EngineError::RatesNotFound { date: d }) => assert_eq!(d, date),
            other => panic!("Expected RatesNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.contains("engine.yaml")),
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }
}
