//! Employee State Insurance contribution calculation.

use rust_decimal::Decimal;

use crate::models::{AuditStep, EsiConfig, EsiContribution};

use super::rounding::{percent_of, round_rupees};

/// The result of an ESI calculation, including the contribution and audit step.
#[derive(Debug, Clone)]
pub struct EsiCalculationResult {
    /// The computed contributions.
    pub contribution: EsiContribution,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes ESI contributions on gross monthly salary.
///
/// Eligibility is a cliff: at or below the ceiling both rates apply to the
/// whole gross; one rupee above it, nothing is due.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_esi;
/// use payroll_engine::models::EsiConfig;
/// use rust_decimal::Decimal;
///
/// let esi = calculate_esi(Decimal::from(20000), &EsiConfig::statutory(), 1).contribution;
/// assert_eq!(esi.employee, Decimal::from(150));
/// assert_eq!(esi.employer, Decimal::from(650));
/// assert!(esi.is_applicable);
///
/// let esi = calculate_esi(Decimal::from(21001), &EsiConfig::statutory(), 1).contribution;
/// assert!(!esi.is_applicable);
/// ```
pub fn calculate_esi(
    gross_monthly_salary: Decimal,
    config: &EsiConfig,
    step_number: u32,
) -> EsiCalculationResult {
    let input = serde_json::json!({
        "gross_monthly_salary": gross_monthly_salary.normalize().to_string(),
        "ceiling": config.ceiling.normalize().to_string(),
        "employee_rate": config.employee_rate.normalize().to_string(),
        "employer_rate": config.employer_rate.normalize().to_string(),
        "enabled": config.enabled
    });

    if !config.enabled || gross_monthly_salary > config.ceiling {
        let reasoning = if !config.enabled {
            "ESI disabled for this employee".to_string()
        } else {
            format!(
                "Gross ₹{} exceeds ESI ceiling ₹{}; not applicable",
                gross_monthly_salary.normalize(),
                config.ceiling.normalize()
            )
        };
        let audit_step = AuditStep {
            step_number,
            rule_id: "esi_contribution".to_string(),
            rule_name: "Employee State Insurance".to_string(),
            clause_ref: "ESI Act 1948, s.39".to_string(),
            input,
            output: serde_json::json!({
                "is_applicable": false,
                "employee": "0",
                "employer": "0"
            }),
            reasoning,
        };
        return EsiCalculationResult {
            contribution: EsiContribution::not_applicable(),
            audit_step,
        };
    }

    let employee = round_rupees(percent_of(gross_monthly_salary, config.employee_rate));
    let employer = round_rupees(percent_of(gross_monthly_salary, config.employer_rate));

    let audit_step = AuditStep {
        step_number,
        rule_id: "esi_contribution".to_string(),
        rule_name: "Employee State Insurance".to_string(),
        clause_ref: "ESI Act 1948, s.39".to_string(),
        input,
        output: serde_json::json!({
            "is_applicable": true,
            "employee": employee.to_string(),
            "employer": employer.to_string()
        }),
        reasoning: format!(
            "Gross ₹{} within ceiling ₹{}: employee {}% = ₹{}, employer {}% = ₹{}",
            gross_monthly_salary.normalize(),
            config.ceiling.normalize(),
            config.employee_rate.normalize(),
            employee,
            config.employer_rate.normalize(),
            employer
        ),
    };

    EsiCalculationResult {
        contribution: EsiContribution {
            employee,
            employer,
            is_applicable: true,
        },
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// ESI-001: within the ceiling
    #[test]
    fn test_within_ceiling() {
        let esi = calculate_esi(dec("20000"), &EsiConfig::statutory(), 1).contribution;

        assert_eq!(esi.employee, dec("150"));
        assert_eq!(esi.employer, dec("650"));
        assert!(esi.is_applicable);
    }

    /// ESI-002: one rupee above the ceiling
    #[test]
    fn test_one_rupee_above_ceiling_is_not_applicable() {
        let esi = calculate_esi(dec("21001"), &EsiConfig::statutory(), 1).contribution;

        assert!(!esi.is_applicable);
        assert_eq!(esi.employee, Decimal::ZERO);
        assert_eq!(esi.employer, Decimal::ZERO);
    }

    /// ESI-003: exactly at the ceiling
    #[test]
    fn test_exactly_at_ceiling_is_applicable() {
        let esi = calculate_esi(dec("21000"), &EsiConfig::statutory(), 1).contribution;

        assert!(esi.is_applicable);
        // 0.75% of 21000 = 157.5 -> 158 (half to even)
        assert_eq!(esi.employee, dec("158"));
        // 3.25% of 21000 = 682.5 -> 682 (half to even)
        assert_eq!(esi.employer, dec("682"));
    }

    #[test]
    fn test_fractional_gross_just_above_ceiling() {
        let esi = calculate_esi(dec("21000.01"), &EsiConfig::statutory(), 1).contribution;
        assert!(!esi.is_applicable);
    }

    #[test]
    fn test_disabled_is_not_applicable() {
        let result = calculate_esi(dec("10000"), &EsiConfig::disabled(), 1);

        assert!(!result.contribution.is_applicable);
        assert!(result.audit_step.reasoning.contains("disabled"));
    }

    #[test]
    fn test_audit_step_for_cliff() {
        let result = calculate_esi(dec("25000"), &EsiConfig::statutory(), 6);

        assert_eq!(result.audit_step.step_number, 6);
        assert_eq!(
            result.audit_step.output["is_applicable"].as_bool().unwrap(),
            false
        );
        assert!(result.audit_step.reasoning.contains("exceeds"));
    }
}
