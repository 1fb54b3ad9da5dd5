//! Annual reshaping of a decomposition.

use crate::models::{AnnualView, CompensationPolicy};

use super::decompose::decompose_with_rates;
use super::statutory::StatutoryRates;

/// Decomposes the policy and returns monthly and annual figures side by side.
///
/// # Examples
///
/// ```
/// use ctc_engine::calculation::to_annual_view;
/// use ctc_engine::models::CompensationPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = CompensationPolicy {
///     annual_ctc: Decimal::from(600_000),
///     ..Default::default()
/// };
/// let view = to_annual_view(&policy);
/// assert_eq!(view.annual.gross, view.monthly.gross * Decimal::from(12));
/// ```
pub fn to_annual_view(policy: &CompensationPolicy) -> AnnualView {
    to_annual_view_with_rates(policy, &StatutoryRates::default())
}

/// Same as [`to_annual_view`] with explicit statutory rates.
pub fn to_annual_view_with_rates(policy: &CompensationPolicy, rates: &StatutoryRates) -> AnnualView {
    AnnualView::from(decompose_with_rates(policy, rates).breakdown)
}
