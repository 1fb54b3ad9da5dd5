//! Core data models for the compensation engine.
//!
//! This module contains the policy input, the breakdown outputs, and the
//! audit trace types shared by the calculation and API layers.

mod audit;
mod breakdown;
mod policy;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use breakdown::{AnnualBreakdown, AnnualView, MONTHS_PER_YEAR, MonthlyBreakdown};
pub use policy::{CompensationPolicy, EngagementType, FixedAllowances, MAX_POLICY_AMOUNT};
