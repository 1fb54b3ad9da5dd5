//! Configuration types for the compensation engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::calculation::StatutoryRates;

/// Metadata about the jurisdiction a configuration directory describes.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short code (e.g., "IN").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Currency label printed on statements.
    pub currency: String,
    /// Version of the configuration set.
    pub version: String,
}

/// A statutory rate table effective from a given date.
#[derive(Debug, Clone, Deserialize)]
pub struct RateConfig {
    /// The first date these rates apply to.
    pub effective_date: NaiveDate,
    /// The rates themselves.
    pub statutory: StatutoryRates,
}

/// The complete engine configuration loaded from a directory.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: JurisdictionMetadata,
    /// Rate tables sorted oldest first.
    rates: Vec<RateConfig>,
}

impl EngineConfig {
    /// Creates a new EngineConfig, ordering rate tables by effective date.
    pub fn new(metadata: JurisdictionMetadata, rates: Vec<RateConfig>) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            rates: sorted_rates,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns all rate tables, oldest first.
    pub fn rates(&self) -> &[RateConfig] {
        &self.rates
    }
}
