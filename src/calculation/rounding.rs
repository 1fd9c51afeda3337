//! Rupee rounding and percentage helpers shared by the calculators.
//!
//! Every externally visible rupee figure is rounded exactly once, to whole
//! rupees, with banker's rounding (half to even). Intermediates stay exact.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole rupees, half to even.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_rupees;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_rupees(Decimal::from_str("1249.5").unwrap()), Decimal::from(1250));
/// assert_eq!(round_rupees(Decimal::from_str("1250.5").unwrap()), Decimal::from(1250));
/// assert_eq!(round_rupees(Decimal::from_str("2727.27").unwrap()), Decimal::from(2727));
/// ```
pub fn round_rupees(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// `amount × rate / 100`, unrounded.
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate / Decimal::ONE_HUNDRED
}

/// Rounds a percentage to two decimal places, half to even.
pub fn round_rate(rate: Decimal) -> Decimal {
    rate.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_half_rounds_to_even() {
        assert_eq!(round_rupees(dec("0.5")), dec("0"));
        assert_eq!(round_rupees(dec("1.5")), dec("2"));
        assert_eq!(round_rupees(dec("2.5")), dec("2"));
        assert_eq!(round_rupees(dec("1249.5")), dec("1250"));
    }

    #[test]
    fn test_non_midpoints_round_to_nearest() {
        assert_eq!(round_rupees(dec("2727.2727")), dec("2727"));
        assert_eq!(round_rupees(dec("2727.51")), dec("2728"));
        assert_eq!(round_rupees(dec("99.49")), dec("99"));
    }

    #[test]
    fn test_percent_of_is_exact() {
        assert_eq!(percent_of(dec("15000"), dec("8.33")), dec("1249.5"));
        assert_eq!(percent_of(dec("20000"), dec("0.75")), dec("150"));
    }

    #[test]
    fn test_round_rate_two_places() {
        assert_eq!(round_rate(dec("12.345")), dec("12.34"));
        assert_eq!(round_rate(dec("12.355")), dec("12.36"));
    }
}
