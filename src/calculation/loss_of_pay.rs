//! Loss of Pay proration.
//!
//! Unpaid leave reduces pay in proportion to the working days missed.

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::rounding::round_rupees;

/// The result of a Loss of Pay calculation, including the amount and audit step.
#[derive(Debug, Clone)]
pub struct LossOfPayResult {
    /// The amount to withhold, in whole rupees.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes Loss of Pay for `unpaid_days` out of `total_working_days`.
///
/// Returns zero when there are no working days or no unpaid days;
/// otherwise `round(unpaid_days / total_working_days × basis)`. The
/// product is taken before the division so the intermediate stays exact.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_lop;
/// use rust_decimal::Decimal;
///
/// let lop = calculate_lop(Decimal::from(2), Decimal::from(22), Decimal::from(30000));
/// assert_eq!(lop, Decimal::from(2727));
/// ```
pub fn calculate_lop(unpaid_days: Decimal, total_working_days: Decimal, basis: Decimal) -> Decimal {
    if total_working_days <= Decimal::ZERO || unpaid_days <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_rupees(unpaid_days * basis / total_working_days).max(Decimal::ZERO)
}

/// Computes Loss of Pay and records an audit step.
///
/// `rule_id` distinguishes the two prorations the aggregator performs
/// (on total earnings and on basic alone).
pub fn apply_loss_of_pay(
    unpaid_days: Decimal,
    total_working_days: Decimal,
    basis: Decimal,
    rule_id: &str,
    step_number: u32,
) -> LossOfPayResult {
    let amount = calculate_lop(unpaid_days, total_working_days, basis);

    let reasoning = if amount.is_zero() {
        format!(
            "No loss of pay: {} unpaid of {} working days",
            unpaid_days.normalize(),
            total_working_days.normalize()
        )
    } else {
        format!(
            "{} / {} days x ₹{} = ₹{}",
            unpaid_days.normalize(),
            total_working_days.normalize(),
            basis.normalize(),
            amount
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: "Loss of Pay".to_string(),
        clause_ref: "Payment of Wages Act 1936, s.9".to_string(),
        input: serde_json::json!({
            "unpaid_days": unpaid_days.normalize().to_string(),
            "working_days": total_working_days.normalize().to_string(),
            "basis": basis.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.to_string()
        }),
        reasoning,
    };

    LossOfPayResult { amount, audit_step }
}
