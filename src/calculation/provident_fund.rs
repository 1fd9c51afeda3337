//! Provident Fund contribution calculation.
//!
//! This module computes the employee and employer PF contributions on the
//! PF wage (basic pay after Loss of Pay), and splits the employer share
//! into its pension (EPS) and provident fund (EPF) parts.

use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditWarning, PfConfig, PfContribution};

use super::rounding::{percent_of, round_rupees};

/// EPS share of the PF wage, in percent.
pub const EPS_RATE: Decimal = Decimal::from_parts(833, 0, 0, false, 2);

/// Monthly cap on the EPS contribution, in rupees.
pub const EPS_MONTHLY_CAP: Decimal = Decimal::from_parts(1250, 0, 0, false, 0);

/// The result of a PF calculation, including the contribution and audit step.
#[derive(Debug, Clone)]
pub struct PfCalculationResult {
    /// The computed contributions.
    pub contribution: PfContribution,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Raised when the employer rate cannot cover the EPS share.
    pub warning: Option<AuditWarning>,
}

/// Computes PF contributions on `monthly_basic`.
///
/// When PF is disabled every field is zero. Otherwise the rates apply to
/// `min(monthly_basic, ceiling)`; EPS is `min(round(8.33%), 1250)` and EPF
/// is the rest of the employer total.
///
/// An employer rate below 8.33% cannot fund EPS. In that case EPS is
/// clamped to the employer total, EPF is zero, and a
/// `PF_EMPLOYER_RATE_BELOW_EPS` warning is returned. `employer_eps` then
/// holds the clamped amount, which is less than `min(round(8.33%), 1250)`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_pf;
/// use payroll_engine::models::PfConfig;
/// use rust_decimal::Decimal;
///
/// let result = calculate_pf(Decimal::from(20000), &PfConfig::statutory(), 1);
/// let pf = result.contribution;
/// assert_eq!(pf.applicable_basic, Decimal::from(15000));
/// assert_eq!(pf.employee_contribution, Decimal::from(1800));
/// assert_eq!(pf.employer_eps, Decimal::from(1250));
/// assert_eq!(pf.employer_pf, Decimal::from(550));
/// ```
pub fn calculate_pf(
    monthly_basic: Decimal,
    config: &PfConfig,
    step_number: u32,
) -> PfCalculationResult {
    if !config.enabled {
        let audit_step = AuditStep {
            step_number,
            rule_id: "pf_contribution".to_string(),
            rule_name: "Provident Fund".to_string(),
            clause_ref: "EPF Act 1952, s.6".to_string(),
            input: serde_json::json!({
                "monthly_basic": monthly_basic.normalize().to_string(),
                "enabled": false
            }),
            output: serde_json::json!({
                "employee_contribution": "0",
                "employer_contribution": "0"
            }),
            reasoning: "Provident Fund disabled for this employee".to_string(),
        };
        return PfCalculationResult {
            contribution: PfContribution::zero(),
            audit_step,
            warning: None,
        };
    }

    let applicable_basic = monthly_basic.min(config.ceiling).max(Decimal::ZERO);
    let employee_contribution = round_rupees(percent_of(applicable_basic, config.employee_rate));
    let employer_contribution = round_rupees(percent_of(applicable_basic, config.employer_rate));
    let statutory_eps = round_rupees(percent_of(applicable_basic, EPS_RATE)).min(EPS_MONTHLY_CAP);

    let warning = if config.employer_rate < EPS_RATE {
        Some(AuditWarning::new(
            AuditWarning::PF_EMPLOYER_RATE_BELOW_EPS,
            format!(
                "Employer PF rate {}% is below the {}% pension share; EPS limited to ₹{} and EPF set to zero",
                config.employer_rate.normalize(),
                EPS_RATE,
                employer_contribution
            ),
            "high",
        ))
    } else {
        None
    };

    let employer_eps = statutory_eps.min(employer_contribution);
    let employer_pf = employer_contribution - employer_eps;

    let audit_step = AuditStep {
        step_number,
        rule_id: "pf_contribution".to_string(),
        rule_name: "Provident Fund".to_string(),
        clause_ref: "EPF Act 1952, s.6; EPS 1995, para 3".to_string(),
        input: serde_json::json!({
            "monthly_basic": monthly_basic.normalize().to_string(),
            "ceiling": config.ceiling.normalize().to_string(),
            "employee_rate": config.employee_rate.normalize().to_string(),
            "employer_rate": config.employer_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "applicable_basic": applicable_basic.normalize().to_string(),
            "employee_contribution": employee_contribution.to_string(),
            "employer_contribution": employer_contribution.to_string(),
            "employer_eps": employer_eps.to_string(),
            "employer_pf": employer_pf.to_string()
        }),
        reasoning: format!(
            "₹{} x {}% = ₹{} employee; ₹{} employer split EPS ₹{} + EPF ₹{}",
            applicable_basic.normalize(),
            config.employee_rate.normalize(),
            employee_contribution,
            employer_contribution,
            employer_eps,
            employer_pf
        ),
    };

    PfCalculationResult {
        contribution: PfContribution {
            applicable_basic,
            employee_contribution,
            employer_contribution,
            employer_eps,
            employer_pf,
        },
        audit_step,
        warning,
    }
}
