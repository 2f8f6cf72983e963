//! Property-based tests for the allocation invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::AllocationService;
use super::types::{BudgetSplit, UtilizationStatus};

/// Strategy to generate non-negative amounts (0.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate valid splits: three non-negative percentages with two
/// decimal places summing to exactly 100.
fn valid_split() -> impl Strategy<Value = BudgetSplit> {
    (0i64..=10_000i64, 0i64..=10_000i64).prop_map(|(a, b)| {
        // Interpret a and b as hundredths of a percent carved out of 100.
        let first = a.min(10_000);
        let second = b.min(10_000 - first);
        let third = 10_000 - first - second;
        BudgetSplit {
            essentials_percent: Decimal::new(first, 2),
            leisure_percent: Decimal::new(second, 2),
            investment_percent: Decimal::new(third, 2),
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any income and valid split, the three ideal ceilings sum back to
    /// the income total.
    #[test]
    fn prop_ideals_sum_to_income(income in amount(), split in valid_split()) {
        let ideals = AllocationService::ideal_ceilings(income, &split);
        prop_assert_eq!(ideals.essentials + ideals.leisure + ideals.investment, income);
    }

    /// Every valid split generated by the strategy passes validation.
    #[test]
    fn prop_valid_splits_validate(split in valid_split()) {
        prop_assert!(AllocationService::validate_split(&split).is_ok());
    }

    /// Utilization never produces a negative percentage for non-negative
    /// inputs, and a zero ceiling always reports zero.
    #[test]
    fn prop_utilization_non_negative(ideal in amount(), actual in amount()) {
        let percent = AllocationService::utilization(ideal, actual);
        prop_assert!(percent >= Decimal::ZERO);
        if ideal.is_zero() {
            prop_assert_eq!(percent, Decimal::ZERO);
        }
    }

    /// Status tiers partition the utilization axis at 80 and 100.
    #[test]
    fn prop_status_thresholds(ideal in amount(), actual in amount()) {
        let percent = AllocationService::utilization(ideal, actual);
        let status = AllocationService::status(percent);
        if percent < Decimal::from(80) {
            prop_assert_eq!(status, UtilizationStatus::Good);
        } else if percent <= Decimal::ONE_HUNDRED {
            prop_assert_eq!(status, UtilizationStatus::Warning);
        } else {
            prop_assert_eq!(status, UtilizationStatus::Over);
        }
    }

    /// The calculator is a pure function: repeated calls agree.
    #[test]
    fn prop_allocate_idempotent(ideal in amount(), actual in amount()) {
        prop_assert_eq!(
            AllocationService::allocate(ideal, actual),
            AllocationService::allocate(ideal, actual)
        );
    }
}
