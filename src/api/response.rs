//! Response types for the compensation engine API.
//!
//! This module defines the success payloads and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{ContractFee, ConvergenceOutcome, Payslip};
use crate::error::EngineError;
use crate::models::{AuditStep, AuditTrace, MonthlyBreakdown};

/// Response body for `/decompose`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecomposeResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Jurisdiction code of the loaded configuration.
    pub jurisdiction: String,
    /// Date whose statutory rates were applied.
    pub effective_date: NaiveDate,
    /// The computed breakdown.
    pub breakdown: MonthlyBreakdown,
    /// Balancing iterations performed.
    pub iterations: u32,
    /// How the balancing search ended.
    pub outcome: ConvergenceOutcome,
    /// True when the fixed components alone exceed the CTC.
    pub infeasible: bool,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

/// Response body for `/annexure`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnexureResponse {
    /// Suggested download file name.
    pub file_name: String,
    /// MIME type of the document.
    pub mime_type: String,
    /// Base64 `data:` URI of the document.
    pub data_uri: String,
    /// The rendered statement text.
    pub text: String,
    /// Contract fee, when the engagement is a contract.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_fee: Option<ContractFee>,
}

/// Response body for `/payslip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// The full-month breakdown the payslip was prorated from.
    pub breakdown: MonthlyBreakdown,
    /// The prorated payslip.
    pub payslip: Payslip,
    /// Audit step recording the pro-ration.
    pub audit_step: AuditStep,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::RatesNotFound { date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "RATES_NOT_FOUND",
                    format!("No statutory rates effective on {}", date),
                    "Choose an effective_date covered by the configured rate tables",
                ),
            },
            EngineError::InvalidPolicy { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid policy field '{}': {}", field, message),
                    field,
                ),
            },
            EngineError::InvalidAttendance { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_ATTENDANCE",
                    "Invalid attendance",
                    message,
                ),
            },
        }
    }
}
