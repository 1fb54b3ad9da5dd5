//! Contract engagement fee.
//!
//! Contract engagements are billed a flat percentage on top of the annual
//! CTC. The fee is not part of the decomposition; it is layered onto the
//! statement as an extra total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::EngagementType;

use super::statutory::StatutoryRates;

/// Fee charged on a contract engagement's annual CTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractFee {
    /// Percentage applied to the annual CTC.
    pub percent: Decimal,
    /// Fee amount.
    pub amount: Decimal,
    /// Annual CTC plus the fee.
    pub total: Decimal,
}

/// Computes the contract fee, or `None` for regular employees.
///
/// ```
/// use ctc_engine::calculation::{contract_fee, StatutoryRates};
/// use ctc_engine::models::EngagementType;
/// use rust_decimal::Decimal;
///
/// let rates = StatutoryRates::default();
/// let fee = contract_fee(Decimal::from(1_200_000), EngagementType::Contract, &rates).unwrap();
/// assert_eq!(fee.amount, Decimal::from(216_000));
/// assert!(contract_fee(Decimal::from(1_200_000), EngagementType::Employee, &rates).is_none());
/// ```
pub fn contract_fee(
    annual_ctc: Decimal,
    engagement: EngagementType,
    rates: &StatutoryRates,
) -> Option<ContractFee> {
    match engagement {
        EngagementType::Employee => None,
        EngagementType::Contract => {
            let amount =
                annual_ctc.saturating_mul(rates.contract_fee_percent / Decimal::ONE_HUNDRED);
            Some(ContractFee {
                percent: rates.contract_fee_percent,
                amount,
                total: annual_ctc.saturating_add(amount),
            })
        }
    }
}
