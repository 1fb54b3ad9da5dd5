//! Calculation logic for the compensation engine.
//!
//! This module contains the CTC decomposition and its balancing search, the
//! statutory sub-calculations it relies on (provident fund, state insurance,
//! gratuity, professional tax, TDS), the annual reshaping view, the contract
//! engagement fee, and loss-of-pay pro-ration for payslips.

mod annual_view;
mod contract_fee;
mod decompose;
mod loss_of_pay;
mod statutory;

pub use annual_view::{to_annual_view, to_annual_view_with_rates};
pub use contract_fee::{ContractFee, contract_fee};
pub use decompose::{
    CONVERGENCE_TOLERANCE, ConvergenceOutcome, Decomposition, MAX_ITERATIONS, decompose,
    decompose_with_rates,
};
pub use loss_of_pay::{Attendance, LossOfPayResult, Payslip, PayslipLine, apply_loss_of_pay};
pub use statutory::{
    BASIC_SHARE_OF_CTC, CONTRACT_FEE_PERCENT, ESI_EMPLOYEE_RATE, ESI_EMPLOYER_RATE, GRATUITY_RATE,
    PF_RATE, PF_WAGE_CEILING, PROFESSIONAL_TAX_DEFAULT, PROFESSIONAL_TAX_THRESHOLD, ProvidentFund,
    StateInsurance, StatutoryRates, gratuity_provision, professional_tax, provident_fund,
    state_insurance, tds,
};
