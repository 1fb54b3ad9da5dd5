//! Configuration loading and management for the compensation engine.
//!
//! This module loads jurisdiction metadata and dated statutory rate tables
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use ctc_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/india").unwrap();
//! println!("Loaded jurisdiction: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, JurisdictionMetadata, RateConfig};
