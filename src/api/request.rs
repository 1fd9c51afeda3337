//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the
//! `/payroll/calculate` and `/payroll/run` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CompanyConfig;
use crate::models::{
    Attendance, EarningsComponents, EsiConfig, NamedAmount, PayrollCalculationInput, PfConfig,
    TdsConfig, TdsDeductions,
};

/// Request body for the `/payroll/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The tenant whose statutory configuration applies.
    pub company_code: String,
    /// The employee to calculate.
    pub employee: EmployeeRequest,
}

/// Request body for the `/payroll/run` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunRequest {
    /// The tenant whose statutory configuration applies.
    pub company_code: String,
    /// Every employee in the run.
    pub employees: Vec<EmployeeRequest>,
}

/// Employee information in a calculation request.
///
/// Statutory settings default to the company's configuration; the optional
/// `pf`, `esi` and `tds` blocks override them for this employee only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Monthly earnings.
    pub earnings: EarningsComponents,
    /// Annual cost to company.
    pub annual_ctc: Decimal,
    /// Attendance for the month.
    pub attendance: Attendance,
    /// Calendar month, 1-12.
    pub month: u32,
    /// State of registration; falls back to the company's registered state.
    #[serde(default)]
    pub state: Option<String>,
    /// Declared tax deductions; falls back to the company defaults.
    #[serde(default)]
    pub deductions: Option<TdsDeductions>,
    /// Other named deductions.
    #[serde(default)]
    pub other_deductions: Vec<NamedAmount>,
    /// Provident Fund override.
    #[serde(default)]
    pub pf: Option<PfConfig>,
    /// ESI override.
    #[serde(default)]
    pub esi: Option<EsiConfig>,
    /// TDS override.
    #[serde(default)]
    pub tds: Option<TdsConfig>,
}

impl EmployeeRequest {
    /// Builds the engine input by merging this request with the company's
    /// statutory defaults.
    pub fn into_input(self, company: &CompanyConfig) -> PayrollCalculationInput {
        let statutory = company.statutory();
        PayrollCalculationInput {
            employee_id: self.id,
            earnings: self.earnings,
            annual_ctc: self.annual_ctc,
            attendance: self.attendance,
            pf_config: self.pf.unwrap_or_else(|| statutory.pf.clone()),
            esi_config: self.esi.unwrap_or_else(|| statutory.esi.clone()),
            tds_config: self.tds.unwrap_or(statutory.tds),
            tds_deductions: self
                .deductions
                .unwrap_or_else(|| statutory.default_deductions.clone()),
            state: self
                .state
                .or_else(|| company.company().registered_state.clone()),
            month: self.month,
            other_deductions: self.other_deductions,
        }
    }
}
