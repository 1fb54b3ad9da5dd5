//! Loss-of-pay pro-ration for payslips.
//!
//! A payslip takes the monthly breakdown as its line items and scales them by
//! the share of the period actually payable. Professional tax is a flat
//! monthly charge and is not prorated.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, MonthlyBreakdown};

/// Attendance for one pay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Calendar days in the pay period.
    pub days_in_period: u32,
    /// Unpaid days, half days allowed.
    #[serde(default)]
    pub loss_of_pay_days: Decimal,
}

/// A single payslip line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLine {
    /// Component label.
    pub component: String,
    /// Amount after pro-ration, rounded to 2 decimal places.
    pub amount: Decimal,
}

/// Prorated payslip figures for one employee and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Calendar days in the period.
    pub days_in_period: u32,
    /// Days paid for.
    pub payable_days: Decimal,
    /// Earnings lines.
    pub earnings: Vec<PayslipLine>,
    /// Deduction lines.
    pub deductions: Vec<PayslipLine>,
    /// Sum of earnings.
    pub gross: Decimal,
    /// Sum of deductions.
    pub total_deductions: Decimal,
    /// Gross less deductions.
    pub net_pay: Decimal,
}

/// The result of applying loss of pay, including the payslip and audit step.
#[derive(Debug, Clone)]
pub struct LossOfPayResult {
    /// The prorated payslip.
    pub payslip: Payslip,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Prorates a monthly breakdown for loss-of-pay days.
///
/// # Errors
///
/// Returns `InvalidAttendance` when the period has no days, or the
/// loss-of-pay days are negative or exceed the period.
///
/// # Examples
///
/// ```
/// use ctc_engine::calculation::{apply_loss_of_pay, decompose, Attendance};
/// use ctc_engine::models::CompensationPolicy;
/// use rust_decimal::Decimal;
///
/// let breakdown = decompose(&CompensationPolicy {
///     annual_ctc: Decimal::from(600_000),
///     ..Default::default()
/// });
/// let attendance = Attendance { days_in_period: 30, loss_of_pay_days: Decimal::from(15) };
/// let result = apply_loss_of_pay(&breakdown, &attendance, 1).unwrap();
/// assert_eq!(result.payslip.gross, Decimal::from(25_000));
/// ```
pub fn apply_loss_of_pay(
    breakdown: &MonthlyBreakdown,
    attendance: &Attendance,
    step_number: u32,
) -> EngineResult<LossOfPayResult> {
    if attendance.days_in_period == 0 {
        return Err(EngineError::InvalidAttendance {
            message: "days_in_period must be positive".to_string(),
        });
    }

    let days = Decimal::from(attendance.days_in_period);
    let lop = attendance.loss_of_pay_days;
    if lop < Decimal::ZERO || lop > days {
        return Err(EngineError::InvalidAttendance {
            message: format!(
                "loss_of_pay_days {} must be between 0 and {}",
                lop.normalize(),
                attendance.days_in_period
            ),
        });
    }

    let payable_days = days - lop;
    let factor = payable_days / days;
    let line = |component: &str, amount: Decimal| PayslipLine {
        component: component.to_string(),
        amount: cents(amount),
    };

    let earnings = vec![
        line("Basic", breakdown.basic * factor),
        line("HRA", breakdown.hra * factor),
        line("Conveyance Allowance", breakdown.conveyance * factor),
        line("Telephone Allowance", breakdown.telephone * factor),
        line("Medical Allowance", breakdown.medical * factor),
        line("Special Allowance", breakdown.special_allowance * factor),
    ];
    let deductions = vec![
        line("Provident Fund", breakdown.employee_provident_fund * factor),
        line("State Insurance", breakdown.employee_state_insurance * factor),
        line("Professional Tax", breakdown.professional_tax),
        line("TDS", breakdown.tds_monthly * factor),
    ];

    let gross = earnings
        .iter()
        .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.amount));
    let total_deductions = deductions
        .iter()
        .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.amount));
    let net_pay = gross.saturating_sub(total_deductions);

    let audit_step = AuditStep {
        step_number,
        rule_id: "loss_of_pay".to_string(),
        rule_name: "Loss of Pay".to_string(),
        input: serde_json::json!({
            "days_in_period": attendance.days_in_period,
            "loss_of_pay_days": lop.normalize().to_string(),
            "monthly_gross": breakdown.gross.normalize().to_string()
        }),
        output: serde_json::json!({
            "payable_days": payable_days.normalize().to_string(),
            "gross": gross.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string(),
            "net_pay": net_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{} of {} days payable; earnings and contributions scaled, professional tax unchanged",
            payable_days.normalize(),
            attendance.days_in_period
        ),
    };

    Ok(LossOfPayResult {
        payslip: Payslip {
            days_in_period: attendance.days_in_period,
            payable_days,
            earnings,
            deductions,
            gross,
            total_deductions,
            net_pay,
        },
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::decompose;
    use crate::models::{CompensationPolicy, FixedAllowances};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn breakdown() -> MonthlyBreakdown {
        decompose(&CompensationPolicy {
            annual_ctc: dec("1200000"),
            hra_percentage: dec("10"),
            fixed_monthly_allowances: FixedAllowances {
                conveyance: dec("1000"),
                telephone: dec("500"),
                medical: dec("1250"),
            },
            include_provident_fund: true,
            ..Default::default()
        })
    }

    fn attendance(days: u32, lop: &str) -> Attendance {
        Attendance {
            days_in_period: days,
            loss_of_pay_days: dec(lop),
        }
    }

    #[test]
    fn test_full_attendance_matches_breakdown() {
        let result = apply_loss_of_pay(&breakdown(), &attendance(30, "0"), 1).unwrap();

        assert_eq!(result.payslip.gross, dec("98200"));
        assert_eq!(result.payslip.total_deductions, dec("2000"));
        assert_eq!(result.payslip.net_pay, dec("96200"));
        assert_eq!(result.payslip.payable_days, dec("30"));
    }

    #[test]
    fn test_three_days_lop_scales_earnings() {
        let result = apply_loss_of_pay(&breakdown(), &attendance(30, "3"), 1).unwrap();
        let slip = result.payslip;

        assert_eq!(slip.earnings[0].amount, dec("45000"));
        assert_eq!(slip.earnings[5].amount, dec("36405"));
        assert_eq!(slip.gross, dec("88380"));
        assert_eq!(slip.deductions[0].amount, dec("1620"));
        assert_eq!(slip.deductions[2].amount, dec("200"));
        assert_eq!(slip.net_pay, dec("86560"));
    }

    #[test]
    fn test_half_day_lop() {
        let result = apply_loss_of_pay(&breakdown(), &attendance(31, "0.5"), 1).unwrap();
        assert_eq!(result.payslip.payable_days, dec("30.5"));
        assert!(result.payslip.gross < dec("98200"));
    }

    #[test]
    fn test_zero_days_in_period_rejected() {
        let result = apply_loss_of_pay(&breakdown(), &attendance(0, "0"), 1);
        assert!(matches!(result, Err(EngineError::InvalidAttendance { .. })));
    }

    #[test]
    fn test_lop_exceeding_period_rejected() {
        let result = apply_loss_of_pay(&breakdown(), &attendance(30, "31"), 1);
        assert!(matches!(result, Err(EngineError::InvalidAttendance { .. })));
    }

    #[test]
    fn test_negative_lop_rejected() {
        let result = apply_loss_of_pay(&breakdown(), &attendance(30, "-1"), 1);
        assert!(matches!(result, Err(EngineError::InvalidAttendance { .. })));
    }

    #[test]
    fn test_audit_step_records_payable_days() {
        let result = apply_loss_of_pay(&breakdown(), &attendance(30, "3"), 7).unwrap();

        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.rule_id, "loss_of_pay");
        assert_eq!(result.audit_step.output["payable_days"].as_str().unwrap(), "27");
        assert!(result.audit_step.reasoning.contains("27 of 30"));
    }
}
