//! CTC decomposition.
//!
//! Derives a monthly pay structure from an annual CTC. Basic, HRA and the
//! fixed allowances follow directly from the policy; the special allowance is
//! the single free variable, searched for by fixed-point iteration so that
//! gross plus employer contributions plus gratuity reproduce the CTC.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{AuditTrace, CompensationPolicy, MONTHS_PER_YEAR, MonthlyBreakdown};

use super::statutory::{
    BASIC_SHARE_OF_CTC, StatutoryRates, gratuity_provision, professional_tax, provident_fund,
    state_insurance, tds,
};

/// Largest acceptable gap between implied and target annual CTC.
pub const CONVERGENCE_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Upper bound on balancing iterations.
pub const MAX_ITERATIONS: u32 = 10;

/// Decimal places kept on the special allowance after the search.
const SPECIAL_ALLOWANCE_DP: u32 = 2;

/// How the balancing search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceOutcome {
    /// Implied CTC came within tolerance of the target.
    Converged,
    /// The special allowance would have gone negative and was pinned at zero.
    Clamped,
    /// The iteration cap was reached before convergence.
    IterationLimit,
}

/// A breakdown together with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    /// The computed monthly breakdown.
    pub breakdown: MonthlyBreakdown,
    /// Number of balancing iterations performed.
    pub iterations: u32,
    /// How the balancing search ended.
    pub outcome: ConvergenceOutcome,
    /// Every rule applied, in order.
    pub audit_trace: AuditTrace,
}

impl Decomposition {
    /// True when the fixed components alone exceed the monthly CTC, so no
    /// non-negative special allowance can balance the structure.
    pub fn is_infeasible(&self) -> bool {
        self.outcome == ConvergenceOutcome::Clamped && self.breakdown.special_allowance.is_zero()
    }
}

/// Employer-side cost of a candidate structure.
struct EmployerCost {
    gross: Decimal,
    employer_pf: Decimal,
    employer_esi: Decimal,
    gratuity: Decimal,
}

impl EmployerCost {
    fn evaluate(
        policy: &CompensationPolicy,
        rates: &StatutoryRates,
        basic: Decimal,
        gross: Decimal,
    ) -> Self {
        let pf = provident_fund(basic, policy.include_provident_fund, rates);
        let esi = state_insurance(gross, policy.include_state_insurance, rates);
        let gratuity = gratuity_provision(
            basic,
            policy.include_provident_fund,
            policy.include_state_insurance,
            rates,
        );
        Self {
            gross,
            employer_pf: pf.employer,
            employer_esi: esi.employer,
            gratuity,
        }
    }

    fn implied_annual_ctc(&self) -> Decimal {
        self.gross
            .saturating_add(self.employer_pf)
            .saturating_add(self.employer_esi)
            .saturating_mul(MONTHS_PER_YEAR)
            .saturating_add(self.gratuity)
    }
}

/// Decomposes an annual CTC into a monthly breakdown using the built-in
/// statutory rates.
///
/// Total and deterministic: any policy yields a breakdown, and the same
/// policy always yields the same one.
///
/// # Examples
///
/// ```
/// use ctc_engine::calculation::decompose;
/// use ctc_engine::models::{CompensationPolicy, FixedAllowances};
/// use rust_decimal::Decimal;
///
/// let policy = CompensationPolicy {
///     annual_ctc: Decimal::from(1_200_000),
///     hra_percentage: Decimal::from(10),
///     fixed_monthly_allowances: FixedAllowances {
///         conveyance: Decimal::from(1000),
///         telephone: Decimal::from(500),
///         medical: Decimal::from(1250),
///     },
///     include_provident_fund: true,
///     ..Default::default()
/// };
///
/// let breakdown = decompose(&policy);
/// assert_eq!(breakdown.basic, Decimal::from(50_000));
/// assert_eq!(breakdown.special_allowance, Decimal::from(40_450));
/// assert_eq!(breakdown.net_pay, Decimal::from(96_200));
/// ```
pub fn decompose(policy: &CompensationPolicy) -> MonthlyBreakdown {
    decompose_with_rates(policy, &StatutoryRates::default()).breakdown
}

/// Decomposes an annual CTC with explicit statutory rates, returning the
/// breakdown along with the iteration count, outcome and audit trace.
pub fn decompose_with_rates(policy: &CompensationPolicy, rates: &StatutoryRates) -> Decomposition {
    let mut trace = AuditTrace::default();
    let allowances = policy.fixed_monthly_allowances;

    let monthly_ctc = policy.annual_ctc / MONTHS_PER_YEAR;
    let basic = monthly_ctc * BASIC_SHARE_OF_CTC;
    let hra = basic.saturating_mul(policy.hra_percentage / Decimal::ONE_HUNDRED);
    let fixed_earnings = basic
        .saturating_add(hra)
        .saturating_add(allowances.total());
    let mut special_allowance = monthly_ctc
        .saturating_sub(fixed_earnings)
        .max(Decimal::ZERO);

    trace.record(
        "fixed_components",
        "Fixed Components",
        serde_json::json!({
            "annual_ctc": policy.annual_ctc.normalize().to_string(),
            "hra_percentage": policy.hra_percentage.normalize().to_string(),
            "fixed_allowances": allowances.total().normalize().to_string()
        }),
        serde_json::json!({
            "monthly_ctc": monthly_ctc.normalize().to_string(),
            "basic": basic.normalize().to_string(),
            "hra": hra.normalize().to_string(),
            "special_allowance_seed": special_allowance.normalize().to_string()
        }),
        format!(
            "Monthly CTC {} x {} = basic {}; HRA {}% of basic = {}; special allowance seeded at {}",
            monthly_ctc.normalize(),
            BASIC_SHARE_OF_CTC.normalize(),
            basic.normalize(),
            policy.hra_percentage.normalize(),
            hra.normalize(),
            special_allowance.normalize()
        ),
    );

    let mut iterations = 0;
    let mut outcome = ConvergenceOutcome::IterationLimit;

    while iterations < MAX_ITERATIONS {
        iterations += 1;

        let cost = EmployerCost::evaluate(
            policy,
            rates,
            basic,
            fixed_earnings.saturating_add(special_allowance),
        );
        let implied = cost.implied_annual_ctc();
        let diff = policy.annual_ctc.saturating_sub(implied);

        debug!(
            iteration = iterations,
            special_allowance = %special_allowance,
            implied_annual_ctc = %implied,
            diff = %diff,
            "Balancing iteration"
        );

        let previous = special_allowance;
        let reasoning;
        if diff.abs() < CONVERGENCE_TOLERANCE {
            outcome = ConvergenceOutcome::Converged;
            reasoning = format!(
                "Implied CTC {} is within {} of target; stopping",
                implied.round_dp(2),
                CONVERGENCE_TOLERANCE
            );
        } else {
            special_allowance = special_allowance.saturating_add(diff / MONTHS_PER_YEAR);
            if special_allowance < Decimal::ZERO {
                special_allowance = Decimal::ZERO;
                outcome = ConvergenceOutcome::Clamped;
                reasoning = format!(
                    "Adjustment of {} would make special allowance negative; clamped to 0",
                    (diff / MONTHS_PER_YEAR).round_dp(2)
                );
            } else {
                reasoning = format!(
                    "Implied CTC {} misses target by {}; special allowance {} -> {}",
                    implied.round_dp(2),
                    diff.round_dp(2),
                    previous.round_dp(2),
                    special_allowance.round_dp(2)
                );
            }
        }

        trace.record(
            "convergence_iteration",
            "Convergence Iteration",
            serde_json::json!({
                "iteration": iterations,
                "special_allowance": previous.normalize().to_string(),
                "gross": cost.gross.normalize().to_string(),
                "employer_pf": cost.employer_pf.normalize().to_string(),
                "employer_esi": cost.employer_esi.normalize().to_string(),
                "gratuity_annual": cost.gratuity.normalize().to_string()
            }),
            serde_json::json!({
                "implied_annual_ctc": implied.normalize().to_string(),
                "diff": diff.normalize().to_string(),
                "special_allowance": special_allowance.normalize().to_string()
            }),
            reasoning,
        );

        if outcome != ConvergenceOutcome::IterationLimit {
            break;
        }
    }

    match outcome {
        ConvergenceOutcome::Clamped => {
            warn!(
                annual_ctc = %policy.annual_ctc,
                fixed_earnings = %fixed_earnings,
                "Special allowance clamped to zero; fixed components exceed target CTC"
            );
            trace.warn(
                "SPECIAL_ALLOWANCE_CLAMPED",
                format!(
                    "Fixed monthly earnings {} exceed what CTC {} can fund",
                    fixed_earnings.round_dp(2),
                    policy.annual_ctc.normalize()
                ),
                "high",
            );
        }
        ConvergenceOutcome::IterationLimit => {
            warn!(
                annual_ctc = %policy.annual_ctc,
                iterations,
                "Balancing did not converge within iteration limit"
            );
            trace.warn(
                "NOT_CONVERGED",
                format!("Implied CTC not within tolerance after {} iterations", iterations),
                "medium",
            );
        }
        ConvergenceOutcome::Converged => {}
    }

    let special_allowance = special_allowance
        .round_dp_with_strategy(SPECIAL_ALLOWANCE_DP, RoundingStrategy::MidpointAwayFromZero);
    let gross = fixed_earnings.saturating_add(special_allowance);
    let pf = provident_fund(basic, policy.include_provident_fund, rates);
    let esi = state_insurance(gross, policy.include_state_insurance, rates);
    let gratuity = gratuity_provision(
        basic,
        policy.include_provident_fund,
        policy.include_state_insurance,
        rates,
    );

    trace.record(
        "final_pass",
        "Final Pass",
        serde_json::json!({
            "special_allowance": special_allowance.normalize().to_string()
        }),
        serde_json::json!({
            "gross": gross.normalize().to_string(),
            "employee_pf": pf.employee.normalize().to_string(),
            "employer_pf": pf.employer.normalize().to_string(),
            "pf_wage": pf.wage.normalize().to_string(),
            "employee_esi": esi.employee.normalize().to_string(),
            "employer_esi": esi.employer.normalize().to_string(),
            "gratuity_annual": gratuity.normalize().to_string()
        }),
        format!(
            "Special allowance rounded to {}; statutory contributions recomputed on gross {}",
            special_allowance,
            gross.normalize()
        ),
    );

    let professional_tax = professional_tax(gross, policy.professional_tax_override, rates);
    let overridden = policy.professional_tax_override > Decimal::ZERO;
    trace.record(
        "professional_tax",
        "Professional Tax",
        serde_json::json!({
            "gross": gross.normalize().to_string(),
            "override": policy.professional_tax_override.normalize().to_string()
        }),
        serde_json::json!({
            "professional_tax": professional_tax.normalize().to_string(),
            "override_applied": overridden
        }),
        if overridden {
            format!("Override of {} applied", professional_tax.normalize())
        } else {
            format!(
                "Gross {} {} threshold {} -> {}",
                gross.normalize(),
                if gross > rates.professional_tax_threshold { "above" } else { "at or below" },
                rates.professional_tax_threshold.normalize(),
                professional_tax.normalize()
            )
        },
    );

    let tds_monthly = tds(gross, policy.tds_percent);
    let net_pay = gross
        .saturating_sub(pf.employee)
        .saturating_sub(esi.employee)
        .saturating_sub(professional_tax)
        .saturating_sub(tds_monthly);
    trace.record(
        "net_pay",
        "Net Pay",
        serde_json::json!({
            "gross": gross.normalize().to_string(),
            "tds_percent": policy.tds_percent.normalize().to_string()
        }),
        serde_json::json!({
            "tds_monthly": tds_monthly.normalize().to_string(),
            "net_pay": net_pay.normalize().to_string()
        }),
        format!(
            "{} - PF {} - ESI {} - PT {} - TDS {} = {}",
            gross.normalize(),
            pf.employee.normalize(),
            esi.employee.normalize(),
            professional_tax.normalize(),
            tds_monthly.normalize(),
            net_pay.normalize()
        ),
    );

    Decomposition {
        breakdown: MonthlyBreakdown {
            basic,
            hra,
            conveyance: allowances.conveyance,
            telephone: allowances.telephone,
            medical: allowances.medical,
            special_allowance,
            gross,
            employee_provident_fund: pf.employee,
            employer_provident_fund: pf.employer,
            employee_state_insurance: esi.employee,
            employer_state_insurance: esi.employer,
            gratuity_annual_provision: gratuity,
            tds_monthly,
            professional_tax,
            net_pay,
        },
        iterations,
        outcome,
        audit_trace: trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FixedAllowances;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// PF only, no ESI, default professional tax, no TDS.
    fn scenario_a() -> CompensationPolicy {
        CompensationPolicy {
            annual_ctc: dec("1200000"),
            hra_percentage: dec("10"),
            fixed_monthly_allowances: FixedAllowances {
                conveyance: dec("1000"),
                telephone: dec("500"),
                medical: dec("1250"),
            },
            include_provident_fund: true,
            include_state_insurance: false,
            professional_tax_override: Decimal::ZERO,
            tds_percent: Decimal::ZERO,
            ..Default::default()
        }
    }

    fn assert_within_tolerance(breakdown: &MonthlyBreakdown, annual_ctc: Decimal) {
        let gap = (breakdown.implied_annual_ctc() - annual_ctc).abs();
        assert!(
            gap < dec("0.6"),
            "implied CTC {} too far from {}",
            breakdown.implied_annual_ctc(),
            annual_ctc
        );
    }

    #[test]
    fn test_pf_only_structure() {
        let result = decompose_with_rates(&scenario_a(), &StatutoryRates::default());
        let b = result.breakdown;

        assert_eq!(b.basic, dec("50000"));
        assert_eq!(b.hra, dec("5000"));
        assert_eq!(b.conveyance, dec("1000"));
        assert_eq!(b.telephone, dec("500"));
        assert_eq!(b.medical, dec("1250"));
        assert_eq!(b.special_allowance, dec("40450"));
        assert_eq!(b.gross, dec("98200"));
        assert_eq!(b.employee_provident_fund, dec("1800"));
        assert_eq!(b.employer_provident_fund, dec("1800"));
        assert_eq!(b.employee_state_insurance, Decimal::ZERO);
        assert_eq!(b.employer_state_insurance, Decimal::ZERO);
        assert_eq!(b.gratuity_annual_provision, Decimal::ZERO);
        assert_eq!(b.professional_tax, dec("200"));
        assert_eq!(b.tds_monthly, Decimal::ZERO);
        assert_eq!(b.net_pay, dec("96200"));

        assert_eq!(result.iterations, 2);
        assert_eq!(result.outcome, ConvergenceOutcome::Converged);
        assert_eq!(b.implied_annual_ctc(), dec("1200000"));
    }

    #[test]
    fn test_all_zero_policy_yields_zero_breakdown() {
        let result = decompose_with_rates(&CompensationPolicy::default(), &StatutoryRates::default());

        assert_eq!(result.breakdown, MonthlyBreakdown::default());
        assert_eq!(result.iterations, 1);
        assert_eq!(result.outcome, ConvergenceOutcome::Converged);
    }

    #[test]
    fn test_professional_tax_override() {
        let policy = CompensationPolicy {
            professional_tax_override: dec("500"),
            ..scenario_a()
        };
        let b = decompose(&policy);

        assert_eq!(b.gross, dec("98200"));
        assert_eq!(b.professional_tax, dec("500"));
        assert_eq!(b.net_pay, dec("95900"));
    }

    #[test]
    fn test_tds_applied_to_gross() {
        let policy = CompensationPolicy {
            tds_percent: dec("5"),
            ..scenario_a()
        };
        let b = decompose(&policy);

        assert_eq!(b.tds_monthly, dec("4910"));
        assert_eq!(b.net_pay, dec("91290"));
    }

    #[test]
    fn test_no_statutory_flags_converges_on_first_iteration() {
        let policy = CompensationPolicy {
            annual_ctc: dec("600000"),
            hra_percentage: dec("40"),
            ..Default::default()
        };
        let result = decompose_with_rates(&policy, &StatutoryRates::default());

        assert_eq!(result.iterations, 1);
        assert_eq!(result.breakdown.basic, dec("25000"));
        assert_eq!(result.breakdown.hra, dec("10000"));
        assert_eq!(result.breakdown.special_allowance, dec("15000"));
        assert_eq!(result.breakdown.gross, dec("50000"));
        assert_eq!(result.breakdown.professional_tax, dec("200"));
        assert_eq!(result.breakdown.net_pay, dec("49800"));
    }

    #[test]
    fn test_esi_only_converges_geometrically() {
        let policy = CompensationPolicy {
            annual_ctc: dec("240000"),
            include_state_insurance: true,
            ..Default::default()
        };
        let result = decompose_with_rates(&policy, &StatutoryRates::default());
        let b = result.breakdown;

        assert_eq!(result.outcome, ConvergenceOutcome::Converged);
        assert_eq!(result.iterations, 4);
        assert_eq!(b.special_allowance, dec("9370.44"));
        assert_eq!(b.gross, dec("19370.44"));
        assert_eq!(b.employee_state_insurance, dec("145.2783"));
        assert_eq!(b.employer_state_insurance, dec("629.5393"));
        assert_eq!(b.professional_tax, Decimal::ZERO);
        assert_eq!(b.net_pay, dec("19225.1617"));
        assert_within_tolerance(&b, policy.annual_ctc);
    }

    #[test]
    fn test_pf_and_esi_includes_gratuity() {
        let policy = CompensationPolicy {
            include_state_insurance: true,
            ..scenario_a()
        };
        let result = decompose_with_rates(&policy, &StatutoryRates::default());
        let b = result.breakdown;

        assert_eq!(result.outcome, ConvergenceOutcome::Converged);
        assert!(result.iterations <= MAX_ITERATIONS);
        assert_eq!(b.gratuity_annual_provision, dec("28860"));
        assert!(b.employer_state_insurance > Decimal::ZERO);
        assert!(b.special_allowance < dec("40450"));
        assert_within_tolerance(&b, policy.annual_ctc);
    }

    #[test]
    fn test_fixed_components_exceeding_ctc_clamp_special_allowance() {
        let policy = CompensationPolicy {
            annual_ctc: dec("120000"),
            hra_percentage: dec("100"),
            fixed_monthly_allowances: FixedAllowances {
                conveyance: dec("2000"),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = decompose_with_rates(&policy, &StatutoryRates::default());

        assert_eq!(result.outcome, ConvergenceOutcome::Clamped);
        assert_eq!(result.iterations, 1);
        assert!(result.is_infeasible());
        assert_eq!(result.breakdown.special_allowance, Decimal::ZERO);
        assert_eq!(result.breakdown.gross, dec("12000"));
        assert_eq!(result.breakdown.net_pay, dec("12000"));
        assert_eq!(result.audit_trace.warnings[0].code, "SPECIAL_ALLOWANCE_CLAMPED");
    }

    #[test]
    fn test_converged_result_is_not_infeasible() {
        let result = decompose_with_rates(&scenario_a(), &StatutoryRates::default());
        assert!(!result.is_infeasible());
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_negative_ctc_keeps_allowances_non_negative() {
        let policy = CompensationPolicy {
            annual_ctc: dec("-120000"),
            ..Default::default()
        };
        let b = decompose(&policy);

        assert_eq!(b.special_allowance, Decimal::ZERO);
        assert!(b.basic < Decimal::ZERO);
    }

    #[test]
    fn test_decompose_is_idempotent() {
        let policy = CompensationPolicy {
            include_state_insurance: true,
            tds_percent: dec("7.5"),
            ..scenario_a()
        };
        assert_eq!(decompose(&policy), decompose(&policy));
    }

    #[test]
    fn test_audit_trace_records_each_iteration() {
        let result = decompose_with_rates(&scenario_a(), &StatutoryRates::default());
        let trace = &result.audit_trace;

        assert_eq!(trace.steps_for("convergence_iteration").count(), 2);
        assert_eq!(trace.steps[0].rule_id, "fixed_components");
        assert_eq!(trace.steps.last().unwrap().rule_id, "net_pay");

        let first = trace.steps_for("convergence_iteration").next().unwrap();
        assert_eq!(first.output["diff"].as_str().unwrap(), "-21600");
        assert_eq!(first.output["special_allowance"].as_str().unwrap(), "40450");
    }

    #[test]
    fn test_custom_rates_change_pf_ceiling() {
        let rates = StatutoryRates {
            pf_wage_ceiling: dec("21000"),
            ..Default::default()
        };
        let result = decompose_with_rates(&scenario_a(), &rates);

        assert_eq!(result.breakdown.employer_provident_fund, dec("2520"));
        assert_within_tolerance(&result.breakdown, dec("1200000"));
    }

    #[test]
    fn test_slow_convergence_stops_at_iteration_limit() {
        let rates = StatutoryRates {
            esi_employer_rate: dec("0.45"),
            ..Default::default()
        };
        let policy = CompensationPolicy {
            annual_ctc: dec("12000000"),
            include_state_insurance: true,
            ..Default::default()
        };
        let result = decompose_with_rates(&policy, &rates);

        assert_eq!(result.iterations, MAX_ITERATIONS);
        assert_eq!(result.outcome, ConvergenceOutcome::IterationLimit);
        assert!(!result.is_infeasible());
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, "NOT_CONVERGED");

        // Breakdown reflects the special allowance from the last iteration.
        let last = result
            .audit_trace
            .steps_for("convergence_iteration")
            .last()
            .unwrap();
        let last_special = dec(last.output["special_allowance"].as_str().unwrap())
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(result.breakdown.special_allowance, last_special);
        assert!(result.breakdown.special_allowance > Decimal::ZERO);

        let gap = (result.breakdown.implied_annual_ctc() - policy.annual_ctc).abs();
        assert!(gap > CONVERGENCE_TOLERANCE);
    }

    #[test]
    fn test_maximum_ctc_does_not_overflow() {
        let policy = CompensationPolicy {
            annual_ctc: Decimal::MAX,
            hra_percentage: dec("100"),
            include_provident_fund: true,
            include_state_insurance: true,
            ..Default::default()
        };
        let result = decompose_with_rates(&policy, &StatutoryRates::default());

        assert!(result.breakdown.special_allowance >= Decimal::ZERO);
        assert!(result.breakdown.gross > Decimal::ZERO);
        assert!(result.iterations <= MAX_ITERATIONS);
        let annual = crate::models::AnnualBreakdown::from(&result.breakdown);
        assert!(annual.gross >= result.breakdown.gross);
    }

    #[test]
    fn test_maximum_allowance_saturates_and_clamps() {
        let policy = CompensationPolicy {
            fixed_monthly_allowances: FixedAllowances {
                conveyance: Decimal::MAX,
                telephone: dec("1"),
                medical: Decimal::ZERO,
            },
            ..Default::default()
        };
        let result = decompose_with_rates(&policy, &StatutoryRates::default());

        assert_eq!(result.outcome, ConvergenceOutcome::Clamped);
        assert!(result.is_infeasible());
        assert_eq!(result.breakdown.gross, Decimal::MAX);
        assert_eq!(result.breakdown.special_allowance, Decimal::ZERO);
    }
}
