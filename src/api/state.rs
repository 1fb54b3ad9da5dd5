//! Application state for the compensation engine API.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::calculation::StatutoryRates;
use crate::config::ConfigLoader;
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the loaded configuration; handlers resolve statutory rates from it
/// per request.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Resolves the rates for a request's effective date, defaulting to
    /// today (UTC).
    pub fn resolve_rates(
        &self,
        effective_date: Option<NaiveDate>,
    ) -> EngineResult<(NaiveDate, StatutoryRates)> {
        let date = effective_date.unwrap_or_else(|| Utc::now().date_naive());
        let rates = self.config().rates_for(date)?;
        Ok((date, *rates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(ConfigLoader::load("./config/india").unwrap())
    }

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_resolve_rates_uses_given_date() {
        let date = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        let (resolved, rates) = state().resolve_rates(Some(date)).unwrap();
        assert_eq!(resolved, date);
        assert_ne!(rates, StatutoryRates::default());
    }

    #[test]
    fn test_resolve_rates_defaults_to_today() {
        let (resolved, rates) = state().resolve_rates(None).unwrap();
        assert!(resolved >= NaiveDate::from_ymd_opt(2019, 7, 1).unwrap());
        assert_eq!(rates, StatutoryRates::default());
    }
}
