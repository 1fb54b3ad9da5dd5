//! Breakdown models produced by the compensation engine.
//!
//! [`MonthlyBreakdown`] is the engine's primary output. [`AnnualBreakdown`]
//! and [`AnnualView`] reshape it for reports without any new computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Months per year, used for every monthly/annual conversion.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// A self-consistent monthly pay structure.
///
/// `gratuity_annual_provision` is the only annual figure; everything else is
/// per month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    /// Basic salary.
    pub basic: Decimal,
    /// House rent allowance.
    pub hra: Decimal,
    /// Conveyance allowance.
    pub conveyance: Decimal,
    /// Telephone allowance.
    pub telephone: Decimal,
    /// Medical allowance.
    pub medical: Decimal,
    /// Balancing component solved for by the engine.
    pub special_allowance: Decimal,
    /// Sum of all earnings.
    pub gross: Decimal,
    /// Employee share of provident fund.
    pub employee_provident_fund: Decimal,
    /// Employer share of provident fund.
    pub employer_provident_fund: Decimal,
    /// Employee share of state insurance.
    pub employee_state_insurance: Decimal,
    /// Employer share of state insurance.
    pub employer_state_insurance: Decimal,
    /// Annual gratuity provision.
    pub gratuity_annual_provision: Decimal,
    /// Tax withheld at source.
    pub tds_monthly: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,
    /// Take-home pay after all deductions.
    pub net_pay: Decimal,
}

impl MonthlyBreakdown {
    /// Total employer outlay per year implied by this breakdown.
    ///
    /// For a converged decomposition this is within the convergence
    /// tolerance of the policy's annual CTC.
    ///
    /// ```
    /// use ctc_engine::calculation::decompose;
    /// use ctc_engine::models::CompensationPolicy;
    /// use rust_decimal::Decimal;
    ///
    /// let policy = CompensationPolicy {
    ///     annual_ctc: Decimal::from(600_000),
    ///     include_provident_fund: true,
    ///     ..Default::default()
    /// };
    /// let breakdown = decompose(&policy);
    /// assert_eq!(breakdown.implied_annual_ctc(), Decimal::from(600_000));
    /// ```
    pub fn implied_annual_ctc(&self) -> Decimal {
        self.gross
            .saturating_add(self.employer_contributions())
            .saturating_mul(MONTHS_PER_YEAR)
            .saturating_add(self.gratuity_annual_provision)
    }

    /// Sum of all amounts withheld from gross.
    pub fn total_deductions(&self) -> Decimal {
        self.employee_provident_fund
            .saturating_add(self.employee_state_insurance)
            .saturating_add(self.professional_tax)
            .saturating_add(self.tds_monthly)
    }

    /// Employer-side monthly contributions (gratuity excluded).
    pub fn employer_contributions(&self) -> Decimal {
        self.employer_provident_fund
            .saturating_add(self.employer_state_insurance)
    }
}

/// Annual counterpart of a [`MonthlyBreakdown`]: every field multiplied by 12,
/// except gratuity which is already annual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnualBreakdown {
    /// Annual basic salary.
    pub basic: Decimal,
    /// Annual HRA.
    pub hra: Decimal,
    /// Annual conveyance allowance.
    pub conveyance: Decimal,
    /// Annual telephone allowance.
    pub telephone: Decimal,
    /// Annual medical allowance.
    pub medical: Decimal,
    /// Annual special allowance.
    pub special_allowance: Decimal,
    /// Annual gross.
    pub gross: Decimal,
    /// Annual employee provident fund.
    pub employee_provident_fund: Decimal,
    /// Annual employer provident fund.
    pub employer_provident_fund: Decimal,
    /// Annual employee state insurance.
    pub employee_state_insurance: Decimal,
    /// Annual employer state insurance.
    pub employer_state_insurance: Decimal,
    /// Gratuity provision, identical to the monthly breakdown's figure.
    pub gratuity_annual_provision: Decimal,
    /// Annual TDS.
    pub tds: Decimal,
    /// Annual professional tax.
    pub professional_tax: Decimal,
    /// Annual net pay.
    pub net_pay: Decimal,
}

impl From<&MonthlyBreakdown> for AnnualBreakdown {
    fn from(m: &MonthlyBreakdown) -> Self {
        let yearly = |v: Decimal| v.saturating_mul(MONTHS_PER_YEAR);
        AnnualBreakdown {
            basic: yearly(m.basic),
            hra: yearly(m.hra),
            conveyance: yearly(m.conveyance),
            telephone: yearly(m.telephone),
            medical: yearly(m.medical),
            special_allowance: yearly(m.special_allowance),
            gross: yearly(m.gross),
            employee_provident_fund: yearly(m.employee_provident_fund),
            employer_provident_fund: yearly(m.employer_provident_fund),
            employee_state_insurance: yearly(m.employee_state_insurance),
            employer_state_insurance: yearly(m.employer_state_insurance),
            gratuity_annual_provision: m.gratuity_annual_provision,
            tds: yearly(m.tds_monthly),
            professional_tax: yearly(m.professional_tax),
            net_pay: yearly(m.net_pay),
        }
    }
}

/// Monthly and annual views of the same decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualView {
    /// The breakdown as computed.
    pub monthly: MonthlyBreakdown,
    /// The same breakdown scaled to a year.
    pub annual: AnnualBreakdown,
}

impl From<MonthlyBreakdown> for AnnualView {
    fn from(monthly: MonthlyBreakdown) -> Self {
        AnnualView {
            annual: AnnualBreakdown::from(&monthly),
            monthly,
        }
    }
}
