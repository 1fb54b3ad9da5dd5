//! Error types for the compensation engine.
//!
//! The decomposition itself is total and never fails. These errors come from
//! the layers around it: configuration loading, caller-side policy validation,
//! and attendance input for payslip pro-ration.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the compensation engine.
///
/// # Example
///
/// ```
/// use ctc_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No statutory rate table is effective on the requested date.
    #[error("No statutory rates effective on {date}")]
    RatesNotFound {
        /// The date for which rates were requested.
        date: NaiveDate,
    },

    /// A compensation policy field failed validation.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Attendance figures supplied for pro-ration were inconsistent.
    #[error("Invalid attendance: {message}")]
    InvalidAttendance {
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
