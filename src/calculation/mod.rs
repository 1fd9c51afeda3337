//! Calculation logic for the payroll engine.
//!
//! This module contains the statutory calculators (Loss of Pay, Provident
//! Fund, Employee State Insurance, state Professional Tax and annualized
//! income tax withholding) and the aggregator that runs them in order to
//! produce a monthly payslip.

mod income_tax;
mod loss_of_pay;
mod payroll;
mod professional_tax;
mod provident_fund;
mod rounding;
mod state_insurance;

pub use income_tax::{
    CESS_RATE, IncomeTaxSlab, NEW_REGIME_STANDARD_DEDUCTION, SECTION_80C_CAP, SECTION_80D_CAP,
    TdsCalculationResult, calculate_tds, income_tax_slabs, section_87a_rebate, slab_tax,
    surcharge_rate, taxable_income,
};
pub use loss_of_pay::{LossOfPayResult, apply_loss_of_pay, calculate_lop};
pub use payroll::{calculate_monthly_payroll, months_remaining};
pub use professional_tax::{
    MAHARASHTRA_FEBRUARY_TAX, MAHARASHTRA_TOP_SLAB_TAX, ProfessionalTaxOutcome,
    ProfessionalTaxResult, ProfessionalTaxSlab, calculate_professional_tax, get_professional_tax,
    professional_tax_for, professional_tax_slabs,
};
pub use provident_fund::{EPS_MONTHLY_CAP, EPS_RATE, PfCalculationResult, calculate_pf};
pub use rounding::{percent_of, round_rate, round_rupees};
pub use state_insurance::{EsiCalculationResult, calculate_esi};
