//! Core data models for the payroll engine.
//!
//! This module contains all the value objects used throughout the engine.

mod jurisdiction;
mod payroll_input;
mod payroll_result;
mod statutory_config;

pub use jurisdiction::{Jurisdiction, normalize_state_key};
pub use payroll_input::{
    Attendance, EarningsComponents, MAX_AMOUNT, MAX_DAYS, NamedAmount, PayrollCalculationInput,
};
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, DeductionsBreakdown, EarningsBreakdown,
    EmployerContributions, EsiContribution, PayrollCalculationResult, PfContribution,
    ProfessionalTaxAssessment, TaxSlabLine, TdsComputation,
};
pub use statutory_config::{EsiConfig, PfConfig, TaxRegime, TdsConfig, TdsDeductions};
