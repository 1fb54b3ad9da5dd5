//! Request types for the compensation engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::Attendance;
use crate::models::CompensationPolicy;

/// Request body for `/decompose` and `/annual-view`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecomposeRequest {
    /// The compensation policy. Missing fields default to zero.
    #[serde(default)]
    pub policy: CompensationPolicy,
    /// Date whose statutory rates apply. Defaults to today.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
}

/// Request body for `/annexure`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnexureRequest {
    /// Employee display name printed on the statement.
    pub name: String,
    /// The compensation policy.
    #[serde(default)]
    pub policy: CompensationPolicy,
    /// Date whose statutory rates apply. Defaults to today.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
}

/// Request body for `/payslip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipRequest {
    /// The compensation policy.
    #[serde(default)]
    pub policy: CompensationPolicy,
    /// Attendance for the pay period.
    pub attendance: Attendance,
    /// Date whose statutory rates apply. Defaults to today.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
}
