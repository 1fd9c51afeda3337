//! State-wise Professional Tax.
//!
//! Each supported [`Jurisdiction`] owns a fixed table of monthly slabs.
//! Slabs are ascending and non-overlapping; a salary falls in the first
//! slab whose upper bound it does not exceed, so fractional rupees between
//! two printed bounds land in the higher slab.

use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditWarning, Jurisdiction, ProfessionalTaxAssessment};

/// One monthly Professional Tax slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfessionalTaxSlab {
    /// Lowest gross salary in the slab.
    pub min: Decimal,
    /// Highest gross salary in the slab, `None` for the top slab.
    pub max: Option<Decimal>,
    /// Monthly tax for the slab.
    pub tax: Decimal,
}

impl ProfessionalTaxSlab {
    fn contains(&self, gross: Decimal) -> bool {
        match self.max {
            Some(max) => gross <= max,
            None => true,
        }
    }
}

const fn rupees(amount: u32) -> Decimal {
    Decimal::from_parts(amount, 0, 0, false, 0)
}

const fn slab(min: u32, max: Option<u32>, tax: u32) -> ProfessionalTaxSlab {
    let max = match max {
        Some(max) => Some(rupees(max)),
        None => None,
    };
    ProfessionalTaxSlab {
        min: rupees(min),
        max,
        tax: rupees(tax),
    }
}

/// Tax on Maharashtra's top slab, raised to 300 in February.
pub const MAHARASHTRA_TOP_SLAB_TAX: Decimal = rupees(200);

/// Maharashtra's February top-slab tax.
pub const MAHARASHTRA_FEBRUARY_TAX: Decimal = rupees(300);

const FEBRUARY: u32 = 2;

const MAHARASHTRA: [ProfessionalTaxSlab; 3] = [
    slab(0, Some(7500), 0),
    slab(7501, Some(10000), 175),
    slab(10001, None, 200),
];

const KARNATAKA: [ProfessionalTaxSlab; 2] = [slab(0, Some(24999), 0), slab(25000, None, 200)];

const WEST_BENGAL: [ProfessionalTaxSlab; 5] = [
    slab(0, Some(10000), 0),
    slab(10001, Some(15000), 110),
    slab(15001, Some(25000), 130),
    slab(25001, Some(40000), 150),
    slab(40001, None, 200),
];

// Telangana and Andhra Pradesh share the same schedule.
const TELANGANA_ANDHRA: [ProfessionalTaxSlab; 3] = [
    slab(0, Some(15000), 0),
    slab(15001, Some(20000), 150),
    slab(20001, None, 200),
];

const GUJARAT: [ProfessionalTaxSlab; 2] = [slab(0, Some(11999), 0), slab(12000, None, 200)];

const MADHYA_PRADESH: [ProfessionalTaxSlab; 4] = [
    slab(0, Some(18750), 0),
    slab(18751, Some(25000), 125),
    slab(25001, Some(33333), 167),
    slab(33334, None, 208),
];

const NO_PROFESSIONAL_TAX: [ProfessionalTaxSlab; 1] = [slab(0, None, 0)];

/// Returns the slab table for a jurisdiction.
pub fn professional_tax_slabs(jurisdiction: Jurisdiction) -> &'static [ProfessionalTaxSlab] {
    match jurisdiction {
        Jurisdiction::Maharashtra => &MAHARASHTRA,
        Jurisdiction::Karnataka => &KARNATAKA,
        Jurisdiction::WestBengal => &WEST_BENGAL,
        Jurisdiction::Telangana | Jurisdiction::AndhraPradesh => &TELANGANA_ANDHRA,
        Jurisdiction::Gujarat => &GUJARAT,
        Jurisdiction::MadhyaPradesh => &MADHYA_PRADESH,
        Jurisdiction::Delhi
        | Jurisdiction::Haryana
        | Jurisdiction::UttarPradesh
        | Jurisdiction::Rajasthan => &NO_PROFESSIONAL_TAX,
    }
}

/// Outcome of a Professional Tax lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfessionalTaxOutcome {
    /// The state was recognized and taxed from its table.
    Assessed {
        /// The resolved jurisdiction.
        jurisdiction: Jurisdiction,
        /// Monthly tax.
        amount: Decimal,
        /// Whether the Maharashtra February true-up applied.
        february_true_up: bool,
    },
    /// The state was missing or has no table. Nothing was deducted.
    UnsupportedJurisdiction {
        /// The state as supplied, if any.
        state: Option<String>,
    },
}

impl ProfessionalTaxOutcome {
    /// The tax to deduct; zero for an unsupported jurisdiction.
    pub fn amount(&self) -> Decimal {
        match self {
            ProfessionalTaxOutcome::Assessed { amount, .. } => *amount,
            ProfessionalTaxOutcome::UnsupportedJurisdiction { .. } => Decimal::ZERO,
        }
    }
}

/// Looks up the monthly tax for a known jurisdiction.
///
/// Returns the amount and whether the Maharashtra February true-up applied.
/// The true-up only replaces the top slab's 200 with 300; lower Maharashtra
/// slabs are charged as usual in February.
pub fn professional_tax_for(
    jurisdiction: Jurisdiction,
    gross_monthly_salary: Decimal,
    month: u32,
) -> (Decimal, bool) {
    let tax = professional_tax_slabs(jurisdiction)
        .iter()
        .find(|s| s.contains(gross_monthly_salary))
        .map(|s| s.tax)
        .unwrap_or(Decimal::ZERO);

    if jurisdiction == Jurisdiction::Maharashtra
        && month == FEBRUARY
        && tax == MAHARASHTRA_TOP_SLAB_TAX
    {
        return (MAHARASHTRA_FEBRUARY_TAX, true);
    }
    (tax, false)
}

/// Looks up Professional Tax from a free-form state name.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::get_professional_tax;
/// use rust_decimal::Decimal;
///
/// let feb = get_professional_tax(Some("Maharashtra"), Decimal::from(12000), 2);
/// assert_eq!(feb.amount(), Decimal::from(300));
///
/// let mar = get_professional_tax(Some("maharashtra"), Decimal::from(12000), 3);
/// assert_eq!(mar.amount(), Decimal::from(200));
///
/// let unknown = get_professional_tax(Some("Atlantis"), Decimal::from(12000), 3);
/// assert_eq!(unknown.amount(), Decimal::ZERO);
/// ```
pub fn get_professional_tax(
    state: Option<&str>,
    gross_monthly_salary: Decimal,
    month: u32,
) -> ProfessionalTaxOutcome {
    let jurisdiction = match state.map(Jurisdiction::parse) {
        Some(Ok(jurisdiction)) => jurisdiction,
        _ => {
            return ProfessionalTaxOutcome::UnsupportedJurisdiction {
                state: state.map(str::to_string),
            };
        }
    };

    let (amount, february_true_up) = professional_tax_for(jurisdiction, gross_monthly_salary, month);
    ProfessionalTaxOutcome::Assessed {
        jurisdiction,
        amount,
        february_true_up,
    }
}

/// The result of a Professional Tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct ProfessionalTaxResult {
    /// The assessment for the payslip.
    pub assessment: ProfessionalTaxAssessment,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Raised when the state is missing or unsupported.
    pub warning: Option<AuditWarning>,
}

/// Computes Professional Tax and records an audit step.
///
/// An unsupported or missing state deducts nothing and raises an
/// `UNSUPPORTED_JURISDICTION` warning so the payslip is not silently wrong.
pub fn calculate_professional_tax(
    state: Option<&str>,
    gross_monthly_salary: Decimal,
    month: u32,
    step_number: u32,
) -> ProfessionalTaxResult {
    let outcome = get_professional_tax(state, gross_monthly_salary, month);
    let input = serde_json::json!({
        "state": state,
        "gross_monthly_salary": gross_monthly_salary.normalize().to_string(),
        "month": month
    });

    match outcome {
        ProfessionalTaxOutcome::Assessed {
            jurisdiction,
            amount,
            february_true_up,
        } => {
            let reasoning = if february_true_up {
                format!(
                    "{} top slab in February: ₹{} instead of ₹{}",
                    jurisdiction, amount, MAHARASHTRA_TOP_SLAB_TAX
                )
            } else {
                format!(
                    "{} slab for gross ₹{}: ₹{}",
                    jurisdiction,
                    gross_monthly_salary.normalize(),
                    amount
                )
            };
            ProfessionalTaxResult {
                assessment: ProfessionalTaxAssessment {
                    amount,
                    jurisdiction: Some(jurisdiction),
                    february_true_up,
                },
                audit_step: AuditStep {
                    step_number,
                    rule_id: "professional_tax".to_string(),
                    rule_name: "Professional Tax".to_string(),
                    clause_ref: "Constitution of India, Art. 276".to_string(),
                    input,
                    output: serde_json::json!({
                        "jurisdiction": jurisdiction.name(),
                        "amount": amount.to_string(),
                        "february_true_up": february_true_up
                    }),
                    reasoning,
                },
                warning: None,
            }
        }
        ProfessionalTaxOutcome::UnsupportedJurisdiction { state } => {
            let message = match &state {
                Some(state) => format!(
                    "No professional tax table for state '{}'; nothing deducted",
                    state
                ),
                None => "Employee has no registered state; professional tax not deducted"
                    .to_string(),
            };
            ProfessionalTaxResult {
                assessment: ProfessionalTaxAssessment {
                    amount: Decimal::ZERO,
                    jurisdiction: None,
                    february_true_up: false,
                },
                audit_step: AuditStep {
                    step_number,
                    rule_id: "professional_tax".to_string(),
                    rule_name: "Professional Tax".to_string(),
                    clause_ref: "Constitution of India, Art. 276".to_string(),
                    input,
                    output: serde_json::json!({
                        "jurisdiction": null,
                        "amount": "0"
                    }),
                    reasoning: message.clone(),
                },
                warning: Some(AuditWarning::new(
                    AuditWarning::UNSUPPORTED_JURISDICTION,
                    message,
                    "high",
                )),
            }
        }
    }
}
