//! Payroll result models.
//!
//! This module contains the [`PayrollCalculationResult`] type and the
//! per-component breakdowns that make up a payslip, together with the
//! audit trace that records how every figure was derived.
//!
//! Nothing in a result depends on wall-clock time or randomness: the same
//! input always serializes to the same bytes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Jurisdiction, NamedAmount, TaxRegime};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statutory provision for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag tenant misconfigurations that do not stop the calculation
/// but would otherwise produce a legally incorrect payslip unnoticed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Employer PF rate is below the EPS share.
    pub const PF_EMPLOYER_RATE_BELOW_EPS: &'static str = "PF_EMPLOYER_RATE_BELOW_EPS";
    /// State missing or without a Professional Tax table.
    pub const UNSUPPORTED_JURISDICTION: &'static str = "UNSUPPORTED_JURISDICTION";
    /// Deductions exceed gross salary.
    pub const NEGATIVE_NET_PAY: &'static str = "NEGATIVE_NET_PAY";

    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// Provident Fund contributions for the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PfContribution {
    /// Basic pay the rates were applied to, after the ceiling.
    pub applicable_basic: Decimal,
    /// Employee contribution, deducted from pay.
    pub employee_contribution: Decimal,
    /// Total employer contribution (EPS + EPF).
    pub employer_contribution: Decimal,
    /// Employer share routed to the Employee Pension Scheme.
    pub employer_eps: Decimal,
    /// Employer share credited to the provident fund account.
    pub employer_pf: Decimal,
}

impl PfContribution {
    /// All-zero contribution.
    pub fn zero() -> Self {
        Self {
            applicable_basic: Decimal::ZERO,
            employee_contribution: Decimal::ZERO,
            employer_contribution: Decimal::ZERO,
            employer_eps: Decimal::ZERO,
            employer_pf: Decimal::ZERO,
        }
    }
}

/// ESI contributions for the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsiContribution {
    /// Employee contribution, deducted from pay.
    pub employee: Decimal,
    /// Employer contribution.
    pub employer: Decimal,
    /// Whether ESI applied at all this month.
    pub is_applicable: bool,
}

impl EsiContribution {
    /// Contribution when ESI does not apply.
    pub fn not_applicable() -> Self {
        Self {
            employee: Decimal::ZERO,
            employer: Decimal::ZERO,
            is_applicable: false,
        }
    }
}

/// How Professional Tax was resolved for the employee's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalTaxAssessment {
    /// Monthly Professional Tax.
    pub amount: Decimal,
    /// The resolved jurisdiction, or `None` when the state is unsupported.
    pub jurisdiction: Option<Jurisdiction>,
    /// Whether the Maharashtra February true-up was applied.
    pub february_true_up: bool,
}

/// Tax on one band of the progressive slab table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlabLine {
    /// Lower bound of the band.
    pub lower: Decimal,
    /// Upper bound of the band, `None` for the top band.
    pub upper: Option<Decimal>,
    /// Rate in percent.
    pub rate: Decimal,
    /// Portion of taxable income falling in this band.
    pub taxable_amount: Decimal,
    /// Tax on that portion (unrounded).
    pub tax: Decimal,
}

/// Annualized TDS projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TdsComputation {
    /// Regime the tax was computed under.
    pub regime: TaxRegime,
    /// Projected annual gross income the computation started from.
    pub annual_gross_income: Decimal,
    /// Taxable income after deductions.
    pub annual_taxable_income: Decimal,
    /// Slab tax before the 87A rebate.
    pub tax_before_rebate: Decimal,
    /// Section 87A rebate applied.
    pub rebate: Decimal,
    /// Surcharge, rounded to rupees.
    pub surcharge: Decimal,
    /// Health and Education Cess, rounded to rupees.
    pub cess: Decimal,
    /// Total annual tax liability.
    pub annual_tax: Decimal,
    /// Tax to withhold this month.
    pub monthly_tds: Decimal,
    /// Annual tax as a percentage of annual gross income.
    pub effective_rate: Decimal,
    /// Months the annual tax was spread over.
    pub months_remaining: u32,
    /// Per-band tax lines.
    pub slab_breakdown: Vec<TaxSlabLine>,
}

impl TdsComputation {
    /// The all-zero computation used when TDS is disabled or there is no income.
    pub fn zero(regime: TaxRegime, annual_gross_income: Decimal, months_remaining: u32) -> Self {
        Self {
            regime,
            annual_gross_income,
            annual_taxable_income: Decimal::ZERO,
            tax_before_rebate: Decimal::ZERO,
            rebate: Decimal::ZERO,
            surcharge: Decimal::ZERO,
            cess: Decimal::ZERO,
            annual_tax: Decimal::ZERO,
            monthly_tds: Decimal::ZERO,
            effective_rate: Decimal::ZERO,
            months_remaining,
            slab_breakdown: vec![],
        }
    }
}

/// Itemized earnings, before Loss of Pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsBreakdown {
    /// Basic pay.
    pub basic: Decimal,
    /// House rent allowance.
    pub hra: Decimal,
    /// Dearness allowance.
    pub da: Decimal,
    /// Special allowance.
    pub special_allowance: Decimal,
    /// Other earnings lines.
    pub other: Vec<NamedAmount>,
    /// Sum of all earnings.
    pub total: Decimal,
}

/// Itemized deductions.
///
/// `loss_of_pay` is shown for the payslip but is already netted out of
/// gross salary, so it is not part of `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionsBreakdown {
    /// Employee PF contribution.
    pub provident_fund: Decimal,
    /// Employee ESI contribution.
    pub esi: Decimal,
    /// Professional Tax.
    pub professional_tax: Decimal,
    /// Income tax withheld.
    pub tds: Decimal,
    /// Loss of Pay on the earnings components.
    pub loss_of_pay: Decimal,
    /// Other named deductions.
    pub other: Vec<NamedAmount>,
    /// Sum of deductions taken from gross salary.
    pub total: Decimal,
}

/// Statutory contributions paid by the employer on top of salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Employer EPS share.
    pub pension_scheme: Decimal,
    /// Employer EPF share.
    pub provident_fund: Decimal,
    /// Employer ESI contribution.
    pub esi: Decimal,
    /// Sum of the above.
    pub total: Decimal,
}

/// The complete result of one employee's monthly payroll.
///
/// `net_pay == gross_salary - total_deductions` holds for every result
/// the engine produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculationResult {
    /// The employee the calculation is for.
    pub employee_id: String,
    /// Calendar month of the pay period.
    pub month: u32,
    /// Itemized earnings.
    pub earnings: EarningsBreakdown,
    /// Itemized deductions.
    pub deductions: DeductionsBreakdown,
    /// Earnings less Loss of Pay.
    pub gross_salary: Decimal,
    /// Deductions taken from gross salary.
    pub total_deductions: Decimal,
    /// Take-home pay.
    pub net_pay: Decimal,
    /// Basic pay after its own Loss of Pay proration; the PF wage.
    pub effective_basic: Decimal,
    /// Employer-side statutory contributions.
    pub employer_contributions: EmployerContributions,
    /// Provident Fund detail.
    pub provident_fund: PfContribution,
    /// ESI detail.
    pub esi: EsiContribution,
    /// Professional Tax detail.
    pub professional_tax: ProfessionalTaxAssessment,
    /// TDS detail.
    pub tds: TdsComputation,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl PayrollCalculationResult {
    /// Returns true if any warning was raised.
    pub fn has_warnings(&self) -> bool {
        !self.audit_trace.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "pf_contribution".to_string(),
            rule_name: "Provident Fund".to_string(),
            clause_ref: "EPF Scheme 1952, para 29".to_string(),
            input: serde_json::json!({"monthly_basic": "20000"}),
            output: serde_json::json!({"employee_contribution": "1800"}),
            reasoning: "12% of 15000".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"pf_contribution\""));
        assert!(json.contains("\"clause_ref\":\"EPF Scheme 1952, para 29\""));
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning::new(
            AuditWarning::UNSUPPORTED_JURISDICTION,
            "No professional tax table for 'Goa'",
            "high",
        );

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"UNSUPPORTED_JURISDICTION\""));
        assert!(json.contains("\"severity\":\"high\""));
    }

    #[test]
    fn test_pf_contribution_zero() {
        let zero = PfContribution::zero();
        assert_eq!(zero.employee_contribution, Decimal::ZERO);
        assert_eq!(zero.employer_eps + zero.employer_pf, zero.employer_contribution);
    }

    #[test]
    fn test_esi_not_applicable() {
        let esi = EsiContribution::not_applicable();
        assert!(!esi.is_applicable);
        assert_eq!(esi.employee, Decimal::ZERO);
        assert_eq!(esi.employer, Decimal::ZERO);
    }

    #[test]
    fn test_decimal_amounts_serialize_as_strings() {
        let esi = EsiContribution {
            employee: dec("150"),
            employer: dec("650"),
            is_applicable: true,
        };

        let json = serde_json::to_string(&esi).unwrap();
        assert!(json.contains("\"employee\":\"150\""));
        assert!(json.contains("\"employer\":\"650\""));
        assert!(json.contains("\"is_applicable\":true"));
    }

    #[test]
    fn test_professional_tax_assessment_serialization() {
        let assessment = ProfessionalTaxAssessment {
            amount: dec("300"),
            jurisdiction: Some(Jurisdiction::Maharashtra),
            february_true_up: true,
        };

        let json = serde_json::to_string(&assessment).unwrap();
        assert!(json.contains("\"jurisdiction\":\"maharashtra\""));
        assert!(json.contains("\"february_true_up\":true"));
    }

    #[test]
    fn test_tds_zero_keeps_context() {
        let zero = TdsComputation::zero(TaxRegime::Old, dec("0"), 9);
        assert_eq!(zero.regime, TaxRegime::Old);
        assert_eq!(zero.months_remaining, 9);
        assert!(zero.slab_breakdown.is_empty());
    }

    #[test]
    fn test_audit_trace_default_is_empty() {
        let trace = AuditTrace::default();
        assert!(trace.steps.is_empty());
        assert!(trace.warnings.is_empty());
    }
}
