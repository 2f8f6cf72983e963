//! Goal progress calculation.

use rust_decimal::Decimal;

/// Percent of the target amount saved, rounded to 2dp and clamped to 100.
///
/// A goal with a zero target reports 0% rather than dividing by zero.
#[must_use]
pub fn progress_percent(current_amount: Decimal, target_amount: Decimal) -> Decimal {
    if target_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let percent = (current_amount / target_amount * Decimal::ONE_HUNDRED).round_dp(2);
    percent.min(Decimal::ONE_HUNDRED)
}

/// Whether the goal's target has been reached.
///
/// Zero-target goals are never considered reached; they have nothing to
/// save towards yet.
#[must_use]
pub fn is_reached(current_amount: Decimal, target_amount: Decimal) -> bool {
    target_amount > Decimal::ZERO && current_amount >= target_amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), dec!(1000), dec!(0))]
    #[case(dec!(250), dec!(1000), dec!(25))]
    #[case(dec!(1000), dec!(1000), dec!(100))]
    #[case(dec!(1500), dec!(1000), dec!(100))] // clamped
    #[case(dec!(500), dec!(0), dec!(0))] // zero target guard
    fn test_progress_percent(
        #[case] current: Decimal,
        #[case] target: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(progress_percent(current, target), expected);
    }

    #[test]
    fn test_progress_rounds_to_2dp() {
        assert_eq!(progress_percent(dec!(1), dec!(3)), dec!(33.33));
    }

    #[test]
    fn test_is_reached() {
        assert!(is_reached(dec!(1000), dec!(1000)));
        assert!(is_reached(dec!(1200), dec!(1000)));
        assert!(!is_reached(dec!(999.99), dec!(1000)));
        assert!(!is_reached(dec!(0), dec!(0)));
    }
}
