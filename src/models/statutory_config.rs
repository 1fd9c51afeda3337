//! Statutory configuration value objects.
//!
//! Each tenant supplies its own PF, ESI and TDS configuration. These are
//! plain values handed to every calculation; nothing here is global.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::payroll_input::ensure_amount;

fn validate_rate(field: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(EngineError::invalid_config(
            field,
            format!("rate {} must be between 0 and 100", rate),
        ));
    }
    Ok(())
}

fn validate_ceiling(field: &str, ceiling: Decimal) -> EngineResult<()> {
    if ceiling <= Decimal::ZERO {
        return Err(EngineError::invalid_config(
            field,
            format!("ceiling {} must be greater than zero", ceiling),
        ));
    }
    Ok(())
}

/// Provident Fund configuration.
///
/// Rates are percentages of basic pay; the ceiling caps the basic pay the
/// rates are applied to.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PfConfig;
/// use rust_decimal::Decimal;
///
/// let config = PfConfig::statutory();
/// assert_eq!(config.employee_rate, Decimal::from(12));
/// assert_eq!(config.ceiling, Decimal::from(15000));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PfConfig {
    /// Employee contribution rate in percent.
    pub employee_rate: Decimal,
    /// Employer contribution rate in percent (EPS + EPF).
    pub employer_rate: Decimal,
    /// Wage ceiling in rupees.
    pub ceiling: Decimal,
    /// Whether PF applies to this employee.
    pub enabled: bool,
}

impl PfConfig {
    /// The statutory defaults: 12% / 12% on basic capped at 15,000.
    pub fn statutory() -> Self {
        Self {
            employee_rate: Decimal::from(12),
            employer_rate: Decimal::from(12),
            ceiling: Decimal::from(15000),
            enabled: true,
        }
    }

    /// A configuration with PF switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::statutory()
        }
    }

    /// Checks the rate and ceiling invariants.
    pub fn validate(&self) -> EngineResult<()> {
        validate_rate("pf.employee_rate", self.employee_rate)?;
        validate_rate("pf.employer_rate", self.employer_rate)?;
        if self.enabled {
            validate_ceiling("pf.ceiling", self.ceiling)?;
        }
        Ok(())
    }
}

/// Employee State Insurance configuration.
///
/// ESI applies only when gross monthly salary is at or below the ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsiConfig {
    /// Employee contribution rate in percent.
    pub employee_rate: Decimal,
    /// Employer contribution rate in percent.
    pub employer_rate: Decimal,
    /// Eligibility ceiling on gross monthly salary, in rupees.
    pub ceiling: Decimal,
    /// Whether ESI applies to this employee.
    pub enabled: bool,
}

impl EsiConfig {
    /// The statutory defaults: 0.75% / 3.25% with a 21,000 ceiling.
    pub fn statutory() -> Self {
        Self {
            employee_rate: Decimal::new(75, 2),
            employer_rate: Decimal::new(325, 2),
            ceiling: Decimal::from(21000),
            enabled: true,
        }
    }

    /// A configuration with ESI switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::statutory()
        }
    }

    /// Checks the rate and ceiling invariants.
    pub fn validate(&self) -> EngineResult<()> {
        validate_rate("esi.employee_rate", self.employee_rate)?;
        validate_rate("esi.employer_rate", self.employer_rate)?;
        if self.enabled {
            validate_ceiling("esi.ceiling", self.ceiling)?;
        }
        Ok(())
    }
}

/// The income-tax regime an employee has opted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// Deductions-based regime (80C, 80D, HRA, ...).
    Old,
    /// Simplified regime with a flat standard deduction.
    New,
}

impl TaxRegime {
    /// Returns the lowercase name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRegime::Old => "old",
            TaxRegime::New => "new",
        }
    }
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TDS configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TdsConfig {
    /// Whether tax is withheld for this employee.
    pub enabled: bool,
    /// The regime used to compute the tax.
    pub regime: TaxRegime,
}

impl TdsConfig {
    /// TDS enabled under the given regime.
    pub fn new(regime: TaxRegime) -> Self {
        Self {
            enabled: true,
            regime,
        }
    }
}

/// Declared tax deductions. Only the old regime honours them.
///
/// All fields are optional; a missing standard deduction falls back to
/// [`TdsDeductions::DEFAULT_STANDARD_DEDUCTION`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TdsDeductions {
    /// Section 80C investments (capped at 1,50,000).
    pub section_80c: Option<Decimal>,
    /// Section 80D health insurance premiums (capped at 50,000).
    pub section_80d: Option<Decimal>,
    /// Section 80E education loan interest.
    pub section_80e: Option<Decimal>,
    /// House rent allowance exemption.
    pub hra: Option<Decimal>,
    /// Standard deduction override.
    pub standard_deduction: Option<Decimal>,
    /// Any other allowable deduction.
    pub other: Option<Decimal>,
}

impl TdsDeductions {
    /// Standard deduction under the old regime when none is declared.
    pub const DEFAULT_STANDARD_DEDUCTION: Decimal = Decimal::from_parts(50000, 0, 0, false, 0);

    /// Rejects negative declarations and declarations above
    /// [`MAX_AMOUNT`](super::payroll_input::MAX_AMOUNT).
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("deductions.section_80c", self.section_80c),
            ("deductions.section_80d", self.section_80d),
            ("deductions.section_80e", self.section_80e),
            ("deductions.hra", self.hra),
            ("deductions.standard_deduction", self.standard_deduction),
            ("deductions.other", self.other),
        ];
        for (field, value) in fields {
            if let Some(amount) = value {
                ensure_amount(field, amount)?;
            }
        }
        Ok(())
    }
}
