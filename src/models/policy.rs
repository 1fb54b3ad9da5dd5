//! Compensation policy model.
//!
//! A [`CompensationPolicy`] is the full input to a decomposition: the annual
//! CTC target plus the handful of percentages, fixed amounts, and statutory
//! flags that shape the monthly structure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest annual CTC or monthly amount accepted by [`CompensationPolicy::validate`].
///
/// 10^15 keeps every monthly, annual and statutory figure derived from an
/// accepted policy well inside `Decimal::MAX`.
pub const MAX_POLICY_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// How the person is engaged. Only affects the contract fee layered on top
/// of the statement; the decomposition ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementType {
    /// Regular payroll employee.
    #[default]
    Employee,
    /// Contract engagement, billed with an additional percentage fee.
    Contract,
}

/// Monthly allowances supplied by the caller and held constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedAllowances {
    /// Monthly conveyance allowance.
    #[serde(default)]
    pub conveyance: Decimal,
    /// Monthly telephone allowance.
    #[serde(default)]
    pub telephone: Decimal,
    /// Monthly medical allowance.
    #[serde(default)]
    pub medical: Decimal,
}

impl FixedAllowances {
    /// Sum of all fixed monthly allowances.
    pub fn total(&self) -> Decimal {
        self.conveyance
            .saturating_add(self.telephone)
            .saturating_add(self.medical)
    }
}

/// Input to the compensation engine.
///
/// Every field defaults to zero (or `false`), so a partially filled JSON
/// document still deserializes into a usable policy.
///
/// # Example
///
/// ```
/// use ctc_engine::models::CompensationPolicy;
/// use rust_decimal::Decimal;
///
/// let policy: CompensationPolicy =
///     serde_json::from_str(r#"{ "annual_ctc": "1200000", "include_provident_fund": true }"#)
///         .unwrap();
/// assert_eq!(policy.annual_ctc, Decimal::from(1_200_000));
/// assert_eq!(policy.hra_percentage, Decimal::ZERO);
/// assert!(!policy.include_state_insurance);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompensationPolicy {
    /// Target annual cost to company.
    #[serde(default)]
    pub annual_ctc: Decimal,
    /// HRA as a percentage of monthly basic, in [0, 100].
    #[serde(default)]
    pub hra_percentage: Decimal,
    /// Fixed monthly allowances.
    #[serde(default)]
    pub fixed_monthly_allowances: FixedAllowances,
    /// Whether provident fund contributions apply.
    #[serde(default)]
    pub include_provident_fund: bool,
    /// Whether state insurance contributions apply.
    #[serde(default)]
    pub include_state_insurance: bool,
    /// Explicit monthly professional tax. Zero selects the default rule.
    #[serde(default)]
    pub professional_tax_override: Decimal,
    /// Flat percentage of gross withheld monthly as TDS.
    #[serde(default)]
    pub tds_percent: Decimal,
    /// Engagement type, used for the contract fee on statements.
    #[serde(default)]
    pub engagement: EngagementType,
}

impl CompensationPolicy {
    /// Checks the policy for values callers are expected to reject before
    /// invoking the engine.
    ///
    /// The engine itself accepts any policy; this is for the surfaces that
    /// take user input.
    pub fn validate(&self) -> EngineResult<()> {
        let hundred = Decimal::ONE_HUNDRED;
        let non_negative = [
            ("annual_ctc", self.annual_ctc),
            ("fixed_monthly_allowances.conveyance", self.fixed_monthly_allowances.conveyance),
            ("fixed_monthly_allowances.telephone", self.fixed_monthly_allowances.telephone),
            ("fixed_monthly_allowances.medical", self.fixed_monthly_allowances.medical),
            ("professional_tax_override", self.professional_tax_override),
            ("tds_percent", self.tds_percent),
        ];

        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(invalid(field, "must not be negative"));
            }
            if value > MAX_POLICY_AMOUNT {
                return Err(invalid(field, "exceeds the supported maximum of 10^15"));
            }
        }

        if self.hra_percentage < Decimal::ZERO || self.hra_percentage > hundred {
            return Err(invalid("hra_percentage", "must be between 0 and 100"));
        }

        if self.tds_percent > hundred {
            return Err(invalid("tds_percent", "must not exceed 100"));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidPolicy {
        field: field.to_string(),
        message: message.to_string(),
    }
}
