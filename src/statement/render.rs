//! Plain-text annexure rendering.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculation::ContractFee;
use crate::models::{AnnualBreakdown, MonthlyBreakdown};

const LABEL_WIDTH: usize = 32;
const MONTHLY_WIDTH: usize = 14;
const ANNUAL_WIDTH: usize = 16;

/// Heading printed on the first line of every statement.
pub const STATEMENT_TITLE: &str = "ANNEXURE - COMPENSATION STRUCTURE";

fn money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn row(label: &str, monthly: &str, annual: &str) -> String {
    format!(
        "{:<lw$}{:>mw$}{:>aw$}",
        label,
        monthly,
        annual,
        lw = LABEL_WIDTH,
        mw = MONTHLY_WIDTH,
        aw = ANNUAL_WIDTH
    )
}

fn amount_row(label: &str, monthly: Decimal, annual: Decimal) -> String {
    row(label, &money(monthly), &money(annual))
}

fn rule() -> String {
    "-".repeat(LABEL_WIDTH + MONTHLY_WIDTH + ANNUAL_WIDTH)
}

/// Renders the compensation annexure for an employee.
///
/// Formatting only: every figure comes from the breakdown as computed.
/// Field order and labels are fixed.
///
/// # Examples
///
/// ```
/// use ctc_engine::calculation::decompose;
/// use ctc_engine::models::CompensationPolicy;
/// use ctc_engine::statement::render_text;
/// use rust_decimal::Decimal;
///
/// let ctc = Decimal::from(600_000);
/// let breakdown = decompose(&CompensationPolicy { annual_ctc: ctc, ..Default::default() });
/// let text = render_text("Asha Rao", ctc, &breakdown);
/// assert!(text.starts_with("ANNEXURE - COMPENSATION STRUCTURE\nEmployee: Asha Rao\n"));
/// ```
pub fn render_text(name: &str, annual_ctc: Decimal, breakdown: &MonthlyBreakdown) -> String {
    render_text_with_fee(name, annual_ctc, breakdown, None)
}

/// Renders the annexure and, for contract engagements, appends the fee and
/// the combined total.
pub fn render_text_with_fee(
    name: &str,
    annual_ctc: Decimal,
    breakdown: &MonthlyBreakdown,
    fee: Option<&ContractFee>,
) -> String {
    let m = breakdown;
    let a = AnnualBreakdown::from(breakdown);
    let mut lines = vec![
        STATEMENT_TITLE.to_string(),
        format!("Employee: {}", name),
        format!("Annual CTC: {}", money(annual_ctc)),
        String::new(),
        row("Component", "Monthly", "Annual"),
        rule(),
        "Earnings".to_string(),
        amount_row("Basic", m.basic, a.basic),
        amount_row("House Rent Allowance", m.hra, a.hra),
        amount_row("Conveyance Allowance", m.conveyance, a.conveyance),
        amount_row("Telephone Allowance", m.telephone, a.telephone),
        amount_row("Medical Allowance", m.medical, a.medical),
        amount_row("Special Allowance", m.special_allowance, a.special_allowance),
        amount_row("Gross Salary", m.gross, a.gross),
        String::new(),
        "Employer Contributions".to_string(),
        amount_row(
            "Employer Provident Fund",
            m.employer_provident_fund,
            a.employer_provident_fund,
        ),
        amount_row(
            "Employer State Insurance",
            m.employer_state_insurance,
            a.employer_state_insurance,
        ),
        row(
            "Gratuity Provision",
            "-",
            &money(a.gratuity_annual_provision),
        ),
        String::new(),
        "Deductions".to_string(),
        amount_row(
            "Employee Provident Fund",
            m.employee_provident_fund,
            a.employee_provident_fund,
        ),
        amount_row(
            "Employee State Insurance",
            m.employee_state_insurance,
            a.employee_state_insurance,
        ),
        amount_row("Professional Tax", m.professional_tax, a.professional_tax),
        amount_row("TDS", m.tds_monthly, a.tds),
        String::new(),
        amount_row("Net Pay", m.net_pay, a.net_pay),
        rule(),
        row("Total CTC", "", &money(annual_ctc)),
    ];

    if let Some(fee) = fee {
        lines.push(row(
            &format!("GST @ {}%", fee.percent.normalize()),
            "",
            &money(fee.amount),
        ));
        lines.push(row("Total (CTC + GST)", "", &money(fee.total)));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
