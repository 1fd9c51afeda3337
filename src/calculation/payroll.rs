//! Monthly payroll aggregation.
//!
//! [`calculate_monthly_payroll`] is the engine's single entry point. It runs
//! the component calculators in a fixed order and assembles the payslip:
//!
//! 1. Loss of Pay on the earnings components (basic + HRA + DA + special)
//! 2. Loss of Pay on basic alone, giving the PF wage
//! 3. gross salary = all earnings - step 1
//! 4. PF on the PF wage, ESI and Professional Tax on gross salary
//! 5. TDS on annual CTC less twelve months of employer EPF and ESI
//! 6. net pay = gross salary - every deduction
//!
//! Loss of Pay is already out of gross salary by step 3 and is never
//! subtracted again.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DeductionsBreakdown, EarningsBreakdown,
    EmployerContributions, PayrollCalculationInput, PayrollCalculationResult,
};

use super::income_tax::calculate_tds;
use super::loss_of_pay::apply_loss_of_pay;
use super::professional_tax::calculate_professional_tax;
use super::provident_fund::calculate_pf;
use super::state_insurance::calculate_esi;

const MONTHS_IN_YEAR: u32 = 12;

/// Months of withholding left in the year, counting the current one.
pub fn months_remaining(month: u32) -> u32 {
    (MONTHS_IN_YEAR + 1).saturating_sub(month).max(1)
}

fn overflow(label: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} overflowed", label),
    }
}

/// Adds amounts, failing with `CalculationError` instead of panicking on
/// overflow.
fn checked_sum(label: &str, amounts: impl IntoIterator<Item = Decimal>) -> EngineResult<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .ok_or_else(|| overflow(label))
}

fn annualize(monthly: Decimal) -> EngineResult<Decimal> {
    monthly
        .checked_mul(Decimal::from(MONTHS_IN_YEAR))
        .ok_or_else(|| overflow("annualized contribution"))
}

/// Calculates one employee's payroll for one month.
///
/// Fails with `InvalidInput` or `InvalidConfig` when the input is
/// malformed, and with `CalculationError` if an intermediate total
/// overflows; a failure affects this employee only.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_monthly_payroll;
/// use payroll_engine::models::{
///     Attendance, EarningsComponents, EsiConfig, PayrollCalculationInput, PfConfig,
///     TaxRegime, TdsConfig, TdsDeductions,
/// };
/// use rust_decimal::Decimal;
///
/// let input = PayrollCalculationInput {
///     employee_id: "emp_001".to_string(),
///     earnings: EarningsComponents {
///         basic: Decimal::from(12000),
///         hra: Decimal::from(4800),
///         da: Decimal::ZERO,
///         special_allowance: Decimal::from(1200),
///         other: vec![],
///     },
///     annual_ctc: Decimal::from(240000),
///     attendance: Attendance::full(Decimal::from(22)),
///     pf_config: PfConfig::statutory(),
///     esi_config: EsiConfig::statutory(),
///     tds_config: TdsConfig::new(TaxRegime::New),
///     tds_deductions: TdsDeductions::default(),
///     state: Some("Maharashtra".to_string()),
///     month: 4,
///     other_deductions: vec![],
/// };
///
/// let result = calculate_monthly_payroll(&input).unwrap();
/// assert_eq!(result.gross_salary, Decimal::from(18000));
/// assert_eq!(result.net_pay, result.gross_salary - result.total_deductions);
/// ```
pub fn calculate_monthly_payroll(
    input: &PayrollCalculationInput,
) -> EngineResult<PayrollCalculationResult> {
    input.validate()?;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let earnings = &input.earnings;
    let attendance = &input.attendance;

    // Loss of Pay on the four earnings components
    let lop_total = apply_loss_of_pay(
        attendance.unpaid_leave_days,
        attendance.working_days,
        earnings.component_total(),
        "lop_total_earnings",
        step_number,
    );
    steps.push(lop_total.audit_step);
    step_number += 1;

    // Loss of Pay on basic alone, independently rounded
    let lop_basic = apply_loss_of_pay(
        attendance.unpaid_leave_days,
        attendance.working_days,
        earnings.basic,
        "lop_basic",
        step_number,
    );
    steps.push(lop_basic.audit_step);
    step_number += 1;

    let effective_basic = earnings.basic - lop_basic.amount;
    let earnings_total = checked_sum(
        "earnings total",
        std::iter::once(earnings.component_total())
            .chain(earnings.other.iter().map(|line| line.amount)),
    )?;
    let gross_salary = earnings_total - lop_total.amount;

    let pf = calculate_pf(effective_basic, &input.pf_config, step_number);
    steps.push(pf.audit_step);
    warnings.extend(pf.warning);
    step_number += 1;

    let esi = calculate_esi(gross_salary, &input.esi_config, step_number);
    steps.push(esi.audit_step);
    step_number += 1;

    let pt = calculate_professional_tax(
        input.state.as_deref(),
        gross_salary,
        input.month,
        step_number,
    );
    steps.push(pt.audit_step);
    warnings.extend(pt.warning);
    step_number += 1;

    let annual_employer_pf = annualize(pf.contribution.employer_pf)?;
    let annual_employer_esi = if esi.contribution.is_applicable {
        annualize(esi.contribution.employer)?
    } else {
        Decimal::ZERO
    };
    let projected_income = input
        .annual_ctc
        .checked_sub(annual_employer_pf)
        .and_then(|income| income.checked_sub(annual_employer_esi))
        .ok_or_else(|| overflow("projected income"))?;
    let tds = calculate_tds(
        projected_income,
        &input.tds_config,
        &input.tds_deductions,
        months_remaining(input.month),
        step_number,
    );
    step_number += tds.audit_steps.len() as u32;
    steps.extend(tds.audit_steps);

    let other_deductions_total = checked_sum(
        "other deductions",
        input.other_deductions.iter().map(|line| line.amount),
    )?;
    let total_deductions = checked_sum(
        "total deductions",
        [
            pf.contribution.employee_contribution,
            esi.contribution.employee,
            pt.assessment.amount,
            tds.computation.monthly_tds,
            other_deductions_total,
        ],
    )?;
    let net_pay = gross_salary - total_deductions;

    if net_pay < Decimal::ZERO {
        warnings.push(AuditWarning::new(
            AuditWarning::NEGATIVE_NET_PAY,
            format!(
                "Deductions ₹{} exceed gross salary ₹{}",
                total_deductions, gross_salary
            ),
            "medium",
        ));
    }

    steps.push(AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        clause_ref: "Payment of Wages Act 1936, s.7".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "provident_fund": pf.contribution.employee_contribution.to_string(),
            "esi": esi.contribution.employee.to_string(),
            "professional_tax": pt.assessment.amount.to_string(),
            "tds": tds.computation.monthly_tds.to_string(),
            "other_deductions": other_deductions_total.to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.to_string(),
            "net_pay": net_pay.to_string()
        }),
        reasoning: format!(
            "₹{} gross - ₹{} deductions = ₹{}",
            gross_salary, total_deductions, net_pay
        ),
    });

    for warning in &warnings {
        warn!(
            employee_id = %input.employee_id,
            code = %warning.code,
            "{}",
            warning.message
        );
    }
    debug!(
        employee_id = %input.employee_id,
        month = input.month,
        gross_salary = %gross_salary,
        net_pay = %net_pay,
        steps = steps.len(),
        "Payroll calculated"
    );

    let employer_contributions = EmployerContributions {
        pension_scheme: pf.contribution.employer_eps,
        provident_fund: pf.contribution.employer_pf,
        esi: esi.contribution.employer,
        total: pf.contribution.employer_contribution + esi.contribution.employer,
    };

    Ok(PayrollCalculationResult {
        employee_id: input.employee_id.clone(),
        month: input.month,
        earnings: EarningsBreakdown {
            basic: earnings.basic,
            hra: earnings.hra,
            da: earnings.da,
            special_allowance: earnings.special_allowance,
            other: earnings.other.clone(),
            total: earnings_total,
        },
        deductions: DeductionsBreakdown {
            provident_fund: pf.contribution.employee_contribution,
            esi: esi.contribution.employee,
            professional_tax: pt.assessment.amount,
            tds: tds.computation.monthly_tds,
            loss_of_pay: lop_total.amount,
            other: input.other_deductions.clone(),
            total: total_deductions,
        },
        gross_salary,
        total_deductions,
        net_pay,
        effective_basic,
        employer_contributions,
        provident_fund: pf.contribution,
        esi: esi.contribution,
        professional_tax: pt.assessment,
        tds: tds.computation,
        audit_trace: AuditTrace { steps, warnings },
    })
}
