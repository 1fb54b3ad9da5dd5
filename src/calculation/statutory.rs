//! Statutory rate sub-calculations.
//!
//! Provident fund, state insurance, gratuity, professional tax and TDS are
//! each a small pure function of the current basic or gross. The rates they
//! use live in [`StatutoryRates`], whose defaults are the named constants
//! below.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::MONTHS_PER_YEAR;

/// Share of monthly CTC paid as basic salary. Not configurable.
pub const BASIC_SHARE_OF_CTC: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Monthly wage ceiling on which provident fund is computed.
pub const PF_WAGE_CEILING: Decimal = Decimal::from_parts(15_000, 0, 0, false, 0);

/// Provident fund rate, applied to both the employee and employer share.
pub const PF_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 2);

/// Employee state insurance rate on gross.
pub const ESI_EMPLOYEE_RATE: Decimal = Decimal::from_parts(75, 0, 0, false, 4);

/// Employer state insurance rate on gross.
pub const ESI_EMPLOYER_RATE: Decimal = Decimal::from_parts(325, 0, 0, false, 4);

/// Annual gratuity provision as a share of annual basic.
pub const GRATUITY_RATE: Decimal = Decimal::from_parts(481, 0, 0, false, 4);

/// Gross above which the default professional tax applies.
pub const PROFESSIONAL_TAX_THRESHOLD: Decimal = Decimal::from_parts(25_000, 0, 0, false, 0);

/// Default monthly professional tax above the threshold.
pub const PROFESSIONAL_TAX_DEFAULT: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Percentage fee charged on annual CTC for contract engagements.
pub const CONTRACT_FEE_PERCENT: Decimal = Decimal::from_parts(18, 0, 0, false, 0);

/// Statutory rates used by a decomposition.
///
/// Loaded from dated YAML rate tables by [`crate::config::ConfigLoader`];
/// `Default` yields the built-in constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRates {
    /// Monthly provident fund wage ceiling.
    pub pf_wage_ceiling: Decimal,
    /// Provident fund rate for each share.
    pub pf_rate: Decimal,
    /// Employee state insurance rate.
    pub esi_employee_rate: Decimal,
    /// Employer state insurance rate.
    pub esi_employer_rate: Decimal,
    /// Gratuity provision rate on annual basic.
    pub gratuity_rate: Decimal,
    /// Gross threshold for the default professional tax.
    pub professional_tax_threshold: Decimal,
    /// Default professional tax amount.
    pub professional_tax_amount: Decimal,
    /// Contract fee percentage on annual CTC.
    #[serde(default = "default_contract_fee_percent")]
    pub contract_fee_percent: Decimal,
}

fn default_contract_fee_percent() -> Decimal {
    CONTRACT_FEE_PERCENT
}

impl Default for StatutoryRates {
    fn default() -> Self {
        Self {
            pf_wage_ceiling: PF_WAGE_CEILING,
            pf_rate: PF_RATE,
            esi_employee_rate: ESI_EMPLOYEE_RATE,
            esi_employer_rate: ESI_EMPLOYER_RATE,
            gratuity_rate: GRATUITY_RATE,
            professional_tax_threshold: PROFESSIONAL_TAX_THRESHOLD,
            professional_tax_amount: PROFESSIONAL_TAX_DEFAULT,
            contract_fee_percent: CONTRACT_FEE_PERCENT,
        }
    }
}

/// Provident fund shares for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvidentFund {
    /// Wage the rate was applied to, after the ceiling.
    pub wage: Decimal,
    /// Employee share.
    pub employee: Decimal,
    /// Employer share.
    pub employer: Decimal,
}

/// State insurance shares for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateInsurance {
    /// Employee share.
    pub employee: Decimal,
    /// Employer share.
    pub employer: Decimal,
}

/// Computes provident fund on basic, capped at the wage ceiling.
///
/// ```
/// use ctc_engine::calculation::{provident_fund, StatutoryRates};
/// use rust_decimal::Decimal;
///
/// let pf = provident_fund(Decimal::from(50_000), true, &StatutoryRates::default());
/// assert_eq!(pf.wage, Decimal::from(15_000));
/// assert_eq!(pf.employee, Decimal::from(1_800));
/// assert_eq!(pf.employer, pf.employee);
/// ```
pub fn provident_fund(basic: Decimal, included: bool, rates: &StatutoryRates) -> ProvidentFund {
    if !included {
        return ProvidentFund::default();
    }
    let wage = basic.min(rates.pf_wage_ceiling);
    let share = wage.saturating_mul(rates.pf_rate);
    ProvidentFund {
        wage,
        employee: share,
        employer: share,
    }
}

/// Computes state insurance on gross.
pub fn state_insurance(gross: Decimal, included: bool, rates: &StatutoryRates) -> StateInsurance {
    if !included {
        return StateInsurance::default();
    }
    StateInsurance {
        employee: gross.saturating_mul(rates.esi_employee_rate),
        employer: gross.saturating_mul(rates.esi_employer_rate),
    }
}

/// Computes the annual gratuity provision.
///
/// The provision is only recognised when both provident fund and state
/// insurance are active.
pub fn gratuity_provision(
    basic: Decimal,
    include_provident_fund: bool,
    include_state_insurance: bool,
    rates: &StatutoryRates,
) -> Decimal {
    if include_provident_fund && include_state_insurance {
        basic
            .saturating_mul(MONTHS_PER_YEAR)
            .saturating_mul(rates.gratuity_rate)
    } else {
        Decimal::ZERO
    }
}

/// Monthly professional tax: the override when positive, otherwise the
/// two-tier default on gross.
pub fn professional_tax(gross: Decimal, override_amount: Decimal, rates: &StatutoryRates) -> Decimal {
    if override_amount > Decimal::ZERO {
        override_amount
    } else if gross > rates.professional_tax_threshold {
        rates.professional_tax_amount
    } else {
        Decimal::ZERO
    }
}

/// Monthly TDS as a flat percentage of gross.
pub fn tds(gross: Decimal, percent: Decimal) -> Decimal {
    gross.saturating_mul(percent / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_constants_have_expected_values() {
        assert_eq!(BASIC_SHARE_OF_CTC, dec("0.5"));
        assert_eq!(PF_WAGE_CEILING, dec("15000"));
        assert_eq!(PF_RATE, dec("0.12"));
        assert_eq!(ESI_EMPLOYEE_RATE, dec("0.0075"));
        assert_eq!(ESI_EMPLOYER_RATE, dec("0.0325"));
        assert_eq!(GRATUITY_RATE, dec("0.0481"));
        assert_eq!(PROFESSIONAL_TAX_THRESHOLD, dec("25000"));
        assert_eq!(PROFESSIONAL_TAX_DEFAULT, dec("200"));
        assert_eq!(CONTRACT_FEE_PERCENT, dec("18"));
    }

    #[test]
    fn test_pf_below_ceiling_uses_basic() {
        let pf = provident_fund(dec("10000"), true, &StatutoryRates::default());
        assert_eq!(pf.wage, dec("10000"));
        assert_eq!(pf.employee, dec("1200"));
        assert_eq!(pf.employer, dec("1200"));
    }

    #[test]
    fn test_pf_above_ceiling_is_capped() {
        let pf = provident_fund(dec("50000"), true, &StatutoryRates::default());
        assert_eq!(pf.wage, dec("15000"));
        assert_eq!(pf.employee, dec("1800"));
    }

    #[test]
    fn test_pf_excluded_is_zero() {
        let pf = provident_fund(dec("50000"), false, &StatutoryRates::default());
        assert_eq!(pf, ProvidentFund::default());
    }

    #[test]
    fn test_esi_splits_employee_and_employer() {
        let esi = state_insurance(dec("20000"), true, &StatutoryRates::default());
        assert_eq!(esi.employee, dec("150"));
        assert_eq!(esi.employer, dec("650"));
    }

    #[test]
    fn test_esi_excluded_is_zero() {
        let esi = state_insurance(dec("20000"), false, &StatutoryRates::default());
        assert_eq!(esi, StateInsurance::default());
    }

    #[test]
    fn test_gratuity_requires_both_schemes() {
        let rates = StatutoryRates::default();
        assert_eq!(
            gratuity_provision(dec("50000"), true, true, &rates),
            dec("28860")
        );
        assert_eq!(gratuity_provision(dec("50000"), true, false, &rates), Decimal::ZERO);
        assert_eq!(gratuity_provision(dec("50000"), false, true, &rates), Decimal::ZERO);
        assert_eq!(gratuity_provision(dec("50000"), false, false, &rates), Decimal::ZERO);
    }

    #[test]
    fn test_professional_tax_default_rule() {
        let rates = StatutoryRates::default();
        assert_eq!(professional_tax(dec("25000.01"), Decimal::ZERO, &rates), dec("200"));
        assert_eq!(professional_tax(dec("25000"), Decimal::ZERO, &rates), Decimal::ZERO);
        assert_eq!(professional_tax(Decimal::ZERO, Decimal::ZERO, &rates), Decimal::ZERO);
    }

    #[test]
    fn test_professional_tax_override_wins() {
        let rates = StatutoryRates::default();
        assert_eq!(professional_tax(dec("98200"), dec("500"), &rates), dec("500"));
        assert_eq!(professional_tax(dec("1000"), dec("150"), &rates), dec("150"));
    }

    #[test]
    fn test_tds_is_percentage_of_gross() {
        assert_eq!(tds(dec("98200"), dec("5")), dec("4910"));
        assert_eq!(tds(dec("98200"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_rates_deserialize_without_contract_fee() {
        let yaml = r#"
pf_wage_ceiling: "15000"
pf_rate: "0.12"
esi_employee_rate: "0.0075"
esi_employer_rate: "0.0325"
gratuity_rate: "0.0481"
professional_tax_threshold: "25000"
professional_tax_amount: "200"
"#;
        let rates: StatutoryRates = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rates, StatutoryRates::default());
    }
}
