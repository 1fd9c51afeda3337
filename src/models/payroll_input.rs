//! Payroll input model.
//!
//! This module defines [`PayrollCalculationInput`], everything the engine
//! needs to compute one employee's payslip for one month, already resolved
//! from the compensation record, the attendance subsystem and the tenant's
//! statutory configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{EsiConfig, PfConfig, TdsConfig, TdsDeductions};

/// A named monetary line, used for ad-hoc earnings and deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedAmount {
    /// Payslip label (e.g., "Night shift allowance", "Canteen").
    pub name: String,
    /// Monthly amount in rupees.
    pub amount: Decimal,
}

impl NamedAmount {
    /// Creates a named amount.
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Monthly earnings components from the compensation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsComponents {
    /// Basic pay.
    pub basic: Decimal,
    /// House rent allowance.
    #[serde(default)]
    pub hra: Decimal,
    /// Dearness allowance.
    #[serde(default)]
    pub da: Decimal,
    /// Special allowance.
    #[serde(default)]
    pub special_allowance: Decimal,
    /// Other earnings (bonus, arrears, ...). Not prorated for LOP.
    #[serde(default)]
    pub other: Vec<NamedAmount>,
}

impl EarningsComponents {
    /// Sum of basic, HRA, DA and special allowance.
    ///
    /// This is the basis Loss of Pay is prorated against.
    pub fn component_total(&self) -> Decimal {
        self.basic + self.hra + self.da + self.special_allowance
    }
}

/// Attendance counts for the pay period.
///
/// Counts are decimals so half days are representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Working days in the period.
    pub working_days: Decimal,
    /// Days the employee was present.
    #[serde(default)]
    pub present_days: Decimal,
    /// Approved paid leave days.
    #[serde(default)]
    pub paid_leave_days: Decimal,
    /// Unpaid leave days; these drive Loss of Pay.
    #[serde(default)]
    pub unpaid_leave_days: Decimal,
}

impl Attendance {
    /// Full attendance over `working_days`.
    pub fn full(working_days: Decimal) -> Self {
        Self {
            working_days,
            present_days: working_days,
            paid_leave_days: Decimal::ZERO,
            unpaid_leave_days: Decimal::ZERO,
        }
    }
}

/// The complete input for one employee's monthly payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculationInput {
    /// Identifier of the employee, echoed in the result.
    pub employee_id: String,
    /// Monthly earnings.
    pub earnings: EarningsComponents,
    /// Annual cost to company, inclusive of employer contributions.
    pub annual_ctc: Decimal,
    /// Attendance for the period.
    pub attendance: Attendance,
    /// Provident Fund configuration.
    pub pf_config: PfConfig,
    /// ESI configuration.
    pub esi_config: EsiConfig,
    /// TDS configuration.
    pub tds_config: TdsConfig,
    /// Declared tax deductions.
    #[serde(default)]
    pub tds_deductions: TdsDeductions,
    /// State the employee is registered in, for Professional Tax.
    #[serde(default)]
    pub state: Option<String>,
    /// Calendar month, 1 (January) to 12 (December).
    pub month: u32,
    /// Other named deductions (loan recovery, canteen, ...).
    #[serde(default)]
    pub other_deductions: Vec<NamedAmount>,
}

/// Largest rupee amount accepted on any input line (1e15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Largest day count accepted in an attendance record.
pub const MAX_DAYS: Decimal = Decimal::from_parts(366, 0, 0, false, 0);

fn ensure_in_range(field: &str, value: Decimal, max: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("value {} cannot be negative", value),
        ));
    }
    if value > max {
        return Err(EngineError::invalid_input(
            field,
            format!("value {} exceeds the maximum of {}", value, max),
        ));
    }
    Ok(())
}

/// Rejects negative amounts and amounts above [`MAX_AMOUNT`].
pub(crate) fn ensure_amount(field: &str, value: Decimal) -> EngineResult<()> {
    ensure_in_range(field, value, MAX_AMOUNT)
}

fn ensure_days(field: &str, value: Decimal) -> EngineResult<()> {
    ensure_in_range(field, value, MAX_DAYS)
}

impl PayrollCalculationInput {
    /// Validates the input before any calculation runs.
    ///
    /// Returns `InvalidInput` for negative amounts or day counts, amounts
    /// above [`MAX_AMOUNT`], day counts above [`MAX_DAYS`], a month outside
    /// 1-12, or more unpaid days than working days, and
    /// `InvalidConfig` for out-of-range statutory configuration.
    pub fn validate(&self) -> EngineResult<()> {
        if !(1..=12).contains(&self.month) {
            return Err(EngineError::invalid_input(
                "month",
                format!("month {} must be between 1 and 12", self.month),
            ));
        }

        ensure_amount("earnings.basic", self.earnings.basic)?;
        ensure_amount("earnings.hra", self.earnings.hra)?;
        ensure_amount("earnings.da", self.earnings.da)?;
        ensure_amount("earnings.special_allowance", self.earnings.special_allowance)?;
        for line in &self.earnings.other {
            ensure_amount(&format!("earnings.other[{}]", line.name), line.amount)?;
        }
        ensure_amount("annual_ctc", self.annual_ctc)?;

        let attendance = &self.attendance;
        ensure_days("attendance.working_days", attendance.working_days)?;
        ensure_days("attendance.present_days", attendance.present_days)?;
        ensure_days("attendance.paid_leave_days", attendance.paid_leave_days)?;
        ensure_days("attendance.unpaid_leave_days", attendance.unpaid_leave_days)?;
        if attendance.unpaid_leave_days > attendance.working_days {
            return Err(EngineError::invalid_input(
                "attendance.unpaid_leave_days",
                format!(
                    "{} unpaid days exceed {} working days",
                    attendance.unpaid_leave_days, attendance.working_days
                ),
            ));
        }

        for line in &self.other_deductions {
            ensure_amount(&format!("other_deductions[{}]", line.name), line.amount)?;
        }

        self.pf_config.validate()?;
        self.esi_config.validate()?;
        self.tds_deductions.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaxRegime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_input() -> PayrollCalculationInput {
        PayrollCalculationInput {
            employee_id: "emp_001".to_string(),
            earnings: EarningsComponents {
                basic: dec("20000"),
                hra: dec("8000"),
                da: dec("0"),
                special_allowance: dec("2000"),
                other: vec![],
            },
            annual_ctc: dec("400000"),
            attendance: Attendance::full(dec("22")),
            pf_config: PfConfig::statutory(),
            esi_config: EsiConfig::statutory(),
            tds_config: TdsConfig::new(TaxRegime::New),
            tds_deductions: TdsDeductions::default(),
            state: Some("Maharashtra".to_string()),
            month: 4,
            other_deductions: vec![],
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(create_test_input().validate().is_ok());
    }

    #[test]
    fn test_component_total_excludes_other_earnings() {
        let mut input = create_test_input();
        input
            .earnings
            .other
            .push(NamedAmount::new("Bonus", dec("5000")));

        assert_eq!(input.earnings.component_total(), dec("30000"));
    }

    #[test]
    fn test_month_zero_is_rejected() {
        let mut input = create_test_input();
        input.month = 0;
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "month"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_month_thirteen_is_rejected() {
        let mut input = create_test_input();
        input.month = 13;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_negative_basic_is_rejected() {
        let mut input = create_test_input();
        input.earnings.basic = dec("-1");
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "earnings.basic"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_unpaid_days_is_rejected() {
        let mut input = create_test_input();
        input.attendance.unpaid_leave_days = dec("-2");
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "attendance.unpaid_leave_days")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_unpaid_days_above_working_days_is_rejected() {
        let mut input = create_test_input();
        input.attendance.unpaid_leave_days = dec("23");
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_negative_other_deduction_names_the_line() {
        let mut input = create_test_input();
        input
            .other_deductions
            .push(NamedAmount::new("Canteen", dec("-100")));
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "other_deductions[Canteen]")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_amount_above_maximum_is_rejected() {
        let mut input = create_test_input();
        input.annual_ctc = dec("10000000000000000000000000000");
        match input.validate() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "annual_ctc");
                assert!(message.contains("exceeds the maximum"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }

        let mut input = create_test_input();
        input.earnings.hra = MAX_AMOUNT + Decimal::ONE;
        assert!(input.validate().is_err());

        let mut input = create_test_input();
        input.earnings.basic = MAX_AMOUNT;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_day_count_above_maximum_is_rejected() {
        let mut input = create_test_input();
        input.attendance = Attendance::full(dec("1000000000"));
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "attendance.working_days")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_pf_config_surfaces_as_config_error() {
        let mut input = create_test_input();
        input.pf_config.ceiling = Decimal::ZERO;
        assert!(matches!(
            input.validate(),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_deserialize_input_with_defaults() {
        let json = r#"{
            "employee_id": "emp_002",
            "earnings": { "basic": "15000" },
            "annual_ctc": "240000",
            "attendance": { "working_days": "22" },
            "pf_config": { "employee_rate": "12", "employer_rate": "12", "ceiling": "15000", "enabled": true },
            "esi_config": { "employee_rate": "0.75", "employer_rate": "3.25", "ceiling": "21000", "enabled": true },
            "tds_config": { "enabled": false, "regime": "new" },
            "month": 7
        }"#;

        let input: PayrollCalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.earnings.hra, Decimal::ZERO);
        assert!(input.earnings.other.is_empty());
        assert_eq!(input.attendance.unpaid_leave_days, Decimal::ZERO);
        assert_eq!(input.state, None);
        assert!(input.other_deductions.is_empty());
        assert!(input.validate().is_ok());
    }
}
