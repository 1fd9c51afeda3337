//! Annualized income tax withholding (TDS on salary).
//!
//! Each month the full-year liability is re-projected from the employee's
//! expected annual income and spread over the months left in the year, so
//! withholding naturally varies as the year progresses.
//!
//! The computation runs in a fixed order:
//!
//! 1. taxable income (regime-specific deductions, floored at zero)
//! 2. progressive slab tax
//! 3. Section 87A rebate
//! 4. surcharge on the post-rebate tax
//! 5. Health and Education Cess on tax plus surcharge
//! 6. rounding, then division over the remaining months

use rust_decimal::Decimal;

use crate::models::{AuditStep, TaxRegime, TaxSlabLine, TdsComputation, TdsConfig, TdsDeductions};

use super::rounding::{percent_of, round_rate, round_rupees};

const fn rupees(amount: u64) -> Decimal {
    Decimal::from_parts(amount as u32, (amount >> 32) as u32, 0, false, 0)
}

const fn percent(rate: u32) -> Decimal {
    Decimal::from_parts(rate, 0, 0, false, 0)
}

/// Flat standard deduction under the new regime.
pub const NEW_REGIME_STANDARD_DEDUCTION: Decimal = rupees(75_000);

/// Section 80C cap.
pub const SECTION_80C_CAP: Decimal = rupees(150_000);

/// Section 80D cap.
pub const SECTION_80D_CAP: Decimal = rupees(50_000);

/// Health and Education Cess rate, in percent.
pub const CESS_RATE: Decimal = percent(4);

/// A band of a progressive income-tax table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeTaxSlab {
    /// Lower bound (exclusive of tax below it).
    pub lower: Decimal,
    /// Upper bound, `None` for the top band.
    pub upper: Option<Decimal>,
    /// Marginal rate in percent.
    pub rate: Decimal,
}

const fn band(lower: u64, upper: Option<u64>, rate: u32) -> IncomeTaxSlab {
    let upper = match upper {
        Some(upper) => Some(rupees(upper)),
        None => None,
    };
    IncomeTaxSlab {
        lower: rupees(lower),
        upper,
        rate: percent(rate),
    }
}

const OLD_REGIME_SLABS: [IncomeTaxSlab; 4] = [
    band(0, Some(250_000), 0),
    band(250_000, Some(500_000), 5),
    band(500_000, Some(1_000_000), 20),
    band(1_000_000, None, 30),
];

const NEW_REGIME_SLABS: [IncomeTaxSlab; 6] = [
    band(0, Some(300_000), 0),
    band(300_000, Some(700_000), 5),
    band(700_000, Some(1_000_000), 10),
    band(1_000_000, Some(1_200_000), 15),
    band(1_200_000, Some(1_500_000), 20),
    band(1_500_000, None, 30),
];

/// Section 87A: (income limit, maximum rebate) per regime.
const OLD_REGIME_REBATE: (Decimal, Decimal) = (rupees(500_000), rupees(12_500));
const NEW_REGIME_REBATE: (Decimal, Decimal) = (rupees(700_000), rupees(25_000));

/// Surcharge bands: (taxable income strictly above, rate). Highest first.
const SURCHARGE_BANDS: [(Decimal, Decimal); 4] = [
    (rupees(50_000_000), percent(37)),
    (rupees(20_000_000), percent(25)),
    (rupees(10_000_000), percent(15)),
    (rupees(5_000_000), percent(10)),
];

/// Returns the progressive slab table for a regime.
pub fn income_tax_slabs(regime: TaxRegime) -> &'static [IncomeTaxSlab] {
    match regime {
        TaxRegime::Old => &OLD_REGIME_SLABS,
        TaxRegime::New => &NEW_REGIME_SLABS,
    }
}

/// Taxable income after the regime's deductions, floored at zero.
///
/// The old regime subtracts the standard deduction (default 50,000),
/// 80C and 80D up to their caps, 80E, HRA and other deductions. The new
/// regime subtracts a flat 75,000 and ignores declarations.
pub fn taxable_income(
    annual_gross_income: Decimal,
    regime: TaxRegime,
    deductions: &TdsDeductions,
) -> Decimal {
    let total_deductions = match regime {
        TaxRegime::New => NEW_REGIME_STANDARD_DEDUCTION,
        TaxRegime::Old => {
            let declared = |amount: Option<Decimal>| amount.unwrap_or(Decimal::ZERO);
            deductions
                .standard_deduction
                .unwrap_or(TdsDeductions::DEFAULT_STANDARD_DEDUCTION)
                + declared(deductions.section_80c).min(SECTION_80C_CAP)
                + declared(deductions.section_80d).min(SECTION_80D_CAP)
                + declared(deductions.section_80e)
                + declared(deductions.hra)
                + declared(deductions.other)
        }
    };
    (annual_gross_income - total_deductions).max(Decimal::ZERO)
}

/// Marginal tax across the regime's bands, unrounded, with per-band lines.
///
/// Only bands that carry part of the income are listed.
pub fn slab_tax(taxable: Decimal, regime: TaxRegime) -> (Decimal, Vec<TaxSlabLine>) {
    let mut lines = Vec::new();
    let mut total = Decimal::ZERO;

    for slab in income_tax_slabs(regime) {
        if taxable <= slab.lower {
            break;
        }
        let top = match slab.upper {
            Some(upper) => taxable.min(upper),
            None => taxable,
        };
        let taxable_amount = top - slab.lower;
        let tax = percent_of(taxable_amount, slab.rate);
        total += tax;
        lines.push(TaxSlabLine {
            lower: slab.lower,
            upper: slab.upper,
            rate: slab.rate,
            taxable_amount,
            tax,
        });
    }

    (total, lines)
}

/// Section 87A rebate on `tax`, never more than the tax itself.
///
/// ```
/// use payroll_engine::calculation::section_87a_rebate;
/// use payroll_engine::models::TaxRegime;
/// use rust_decimal::Decimal;
///
/// let rebate = section_87a_rebate(Decimal::from(700_000), Decimal::from(20_000), TaxRegime::New);
/// assert_eq!(rebate, Decimal::from(20_000));
///
/// let rebate = section_87a_rebate(Decimal::from(700_001), Decimal::from(20_000), TaxRegime::New);
/// assert_eq!(rebate, Decimal::ZERO);
/// ```
pub fn section_87a_rebate(taxable: Decimal, tax: Decimal, regime: TaxRegime) -> Decimal {
    let (limit, max_rebate) = match regime {
        TaxRegime::Old => OLD_REGIME_REBATE,
        TaxRegime::New => NEW_REGIME_REBATE,
    };
    if taxable <= limit {
        tax.min(max_rebate).max(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

/// Surcharge rate in percent for a taxable income.
pub fn surcharge_rate(taxable: Decimal) -> Decimal {
    SURCHARGE_BANDS
        .iter()
        .find(|(threshold, _)| taxable > *threshold)
        .map(|(_, rate)| *rate)
        .unwrap_or(Decimal::ZERO)
}

/// The result of a TDS calculation, including the audit steps.
#[derive(Debug, Clone)]
pub struct TdsCalculationResult {
    /// The annual projection and this month's withholding.
    pub computation: TdsComputation,
    /// Audit steps for taxable income, slab tax and withholding.
    pub audit_steps: Vec<AuditStep>,
}

/// Projects annual tax and this month's withholding.
///
/// When TDS is disabled or there is no income every figure is zero.
/// `months_remaining` below one is treated as one.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_tds;
/// use payroll_engine::models::{TaxRegime, TdsConfig, TdsDeductions};
/// use rust_decimal::Decimal;
///
/// let result = calculate_tds(
///     Decimal::from(1_275_000),
///     &TdsConfig::new(TaxRegime::New),
///     &TdsDeductions::default(),
///     12,
///     1,
/// );
/// let tds = result.computation;
/// assert_eq!(tds.annual_taxable_income, Decimal::from(1_200_000));
/// // 20,000 + 30,000 + 30,000 = 80,000; plus 4% cess
/// assert_eq!(tds.annual_tax, Decimal::from(83_200));
/// assert_eq!(tds.monthly_tds, Decimal::from(6_933));
/// ```
pub fn calculate_tds(
    annual_gross_income: Decimal,
    config: &TdsConfig,
    deductions: &TdsDeductions,
    months_remaining: u32,
    step_number: u32,
) -> TdsCalculationResult {
    let regime = config.regime;
    let months = months_remaining.max(1);

    if !config.enabled || annual_gross_income <= Decimal::ZERO {
        let reasoning = if !config.enabled {
            "TDS disabled for this employee".to_string()
        } else {
            format!(
                "No projected income (₹{}); no tax to withhold",
                annual_gross_income.normalize()
            )
        };
        let audit_step = AuditStep {
            step_number,
            rule_id: "tds_withholding".to_string(),
            rule_name: "Income Tax Withholding".to_string(),
            clause_ref: "Income-tax Act 1961, s.192".to_string(),
            input: serde_json::json!({
                "annual_gross_income": annual_gross_income.normalize().to_string(),
                "enabled": config.enabled,
                "regime": regime.as_str()
            }),
            output: serde_json::json!({
                "annual_tax": "0",
                "monthly_tds": "0"
            }),
            reasoning,
        };
        return TdsCalculationResult {
            computation: TdsComputation::zero(regime, annual_gross_income, months),
            audit_steps: vec![audit_step],
        };
    }

    // 1. Taxable income
    let taxable = taxable_income(annual_gross_income, regime, deductions);
    let taxable_step = AuditStep {
        step_number,
        rule_id: "tds_taxable_income".to_string(),
        rule_name: "Taxable Income".to_string(),
        clause_ref: match regime {
            TaxRegime::Old => "Income-tax Act 1961, s.16, ch. VI-A".to_string(),
            TaxRegime::New => "Income-tax Act 1961, s.115BAC".to_string(),
        },
        input: serde_json::json!({
            "annual_gross_income": annual_gross_income.normalize().to_string(),
            "regime": regime.as_str()
        }),
        output: serde_json::json!({
            "annual_taxable_income": taxable.normalize().to_string()
        }),
        reasoning: format!(
            "₹{} less {} regime deductions = ₹{}",
            annual_gross_income.normalize(),
            regime,
            taxable.normalize()
        ),
    };

    // 2. Slab tax, 3. rebate
    let (tax_before_rebate, slab_breakdown) = slab_tax(taxable, regime);
    let rebate = section_87a_rebate(taxable, tax_before_rebate, regime);
    let tax = tax_before_rebate - rebate;
    let slab_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "tds_slab_tax".to_string(),
        rule_name: "Slab Tax and 87A Rebate".to_string(),
        clause_ref: "Income-tax Act 1961, s.87A".to_string(),
        input: serde_json::json!({
            "annual_taxable_income": taxable.normalize().to_string(),
            "regime": regime.as_str()
        }),
        output: serde_json::json!({
            "tax_before_rebate": tax_before_rebate.normalize().to_string(),
            "rebate": rebate.normalize().to_string(),
            "tax": tax.normalize().to_string(),
            "bands": slab_breakdown.len()
        }),
        reasoning: format!(
            "Slab tax ₹{} less 87A rebate ₹{} = ₹{}",
            tax_before_rebate.normalize(),
            rebate.normalize(),
            tax.normalize()
        ),
    };

    // 4. Surcharge, 5. cess
    let surcharge_pct = surcharge_rate(taxable);
    let surcharge = percent_of(tax, surcharge_pct);
    let cess = percent_of(tax + surcharge, CESS_RATE);

    // 6. Round once, then spread over the remaining months
    let annual_tax = round_rupees(tax + surcharge + cess);
    let monthly_tds = round_rupees(annual_tax / Decimal::from(months));
    let effective_rate = round_rate(annual_tax * Decimal::ONE_HUNDRED / annual_gross_income);

    let withholding_step = AuditStep {
        step_number: step_number + 2,
        rule_id: "tds_withholding".to_string(),
        rule_name: "Income Tax Withholding".to_string(),
        clause_ref: "Income-tax Act 1961, s.192".to_string(),
        input: serde_json::json!({
            "tax": tax.normalize().to_string(),
            "surcharge_rate": surcharge_pct.normalize().to_string(),
            "cess_rate": CESS_RATE.to_string(),
            "months_remaining": months
        }),
        output: serde_json::json!({
            "surcharge": round_rupees(surcharge).to_string(),
            "cess": round_rupees(cess).to_string(),
            "annual_tax": annual_tax.to_string(),
            "monthly_tds": monthly_tds.to_string(),
            "effective_rate": effective_rate.normalize().to_string()
        }),
        reasoning: format!(
            "(₹{} + surcharge ₹{} + cess ₹{}) = ₹{} / {} months = ₹{}",
            tax.normalize(),
            round_rupees(surcharge),
            round_rupees(cess),
            annual_tax,
            months,
            monthly_tds
        ),
    };

    TdsCalculationResult {
        computation: TdsComputation {
            regime,
            annual_gross_income,
            annual_taxable_income: taxable,
            tax_before_rebate,
            rebate,
            surcharge: round_rupees(surcharge),
            cess: round_rupees(cess),
            annual_tax,
            monthly_tds,
            effective_rate,
            months_remaining: months,
            slab_breakdown,
        },
        audit_steps: vec![taxable_step, slab_step, withholding_step],
    }
}
