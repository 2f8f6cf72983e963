//! Allocation service tests.

use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fintrack_shared::Period;

use super::error::AllocationError;
use super::service::AllocationService;
use super::types::{BudgetSplit, ExpenseGroup, GroupActuals, UtilizationStatus};

fn split(essentials: Decimal, leisure: Decimal, investment: Decimal) -> BudgetSplit {
    BudgetSplit {
        essentials_percent: essentials,
        leisure_percent: leisure,
        investment_percent: investment,
    }
}

#[test]
fn test_default_split_is_50_30_20() {
    let split = BudgetSplit::default();
    assert_eq!(split.essentials_percent, dec!(50));
    assert_eq!(split.leisure_percent, dec!(30));
    assert_eq!(split.investment_percent, dec!(20));
    assert_eq!(split.total(), dec!(100));
}

#[test]
fn test_ideal_ceilings_default_split() {
    let ideals = AllocationService::ideal_ceilings(dec!(5000), &BudgetSplit::default());
    assert_eq!(ideals.essentials, dec!(2500));
    assert_eq!(ideals.leisure, dec!(1500));
    assert_eq!(ideals.investment, dec!(1000));
}

#[test]
fn test_ideal_ceilings_sum_to_income() {
    let split = split(dec!(33.33), dec!(33.33), dec!(33.34));
    let ideals = AllocationService::ideal_ceilings(dec!(4200), &split);
    assert_eq!(
        ideals.essentials + ideals.leisure + ideals.investment,
        dec!(4200)
    );
}

#[test]
fn test_zero_percent_yields_zero_ideal() {
    let split = split(dec!(70), dec!(30), dec!(0));
    let ideals = AllocationService::ideal_ceilings(dec!(3000), &split);
    assert_eq!(ideals.investment, Decimal::ZERO);
}

#[test]
fn test_utilization_zero_ideal_is_zero() {
    // The divide-by-zero guard: a zeroed-out group reports 0% utilization.
    assert_eq!(AllocationService::utilization(dec!(0), dec!(0)), dec!(0));
    assert_eq!(AllocationService::utilization(dec!(0), dec!(250)), dec!(0));
}

#[rstest]
#[case(dec!(100), dec!(50), dec!(50), UtilizationStatus::Good)]
#[case(dec!(100), dec!(80), dec!(80), UtilizationStatus::Warning)]
#[case(dec!(100), dec!(100), dec!(100), UtilizationStatus::Warning)]
#[case(dec!(100), dec!(150), dec!(150), UtilizationStatus::Over)]
fn test_utilization_and_status(
    #[case] ideal: Decimal,
    #[case] actual: Decimal,
    #[case] expected_percent: Decimal,
    #[case] expected_status: UtilizationStatus,
) {
    let allocation = AllocationService::allocate(ideal, actual);
    assert_eq!(allocation.utilization_percent, expected_percent);
    assert_eq!(allocation.status, expected_status);
}

#[test]
fn test_utilization_rounds_to_2dp() {
    // 1000 / 3000 * 100 = 33.333... -> 33.33
    assert_eq!(
        AllocationService::utilization(dec!(3000), dec!(1000)),
        dec!(33.33)
    );
}

#[test]
fn test_remaining_balance_overspend_not_clamped() {
    assert_eq!(
        AllocationService::remaining_balance(dec!(5000), dec!(5200)),
        dec!(-200)
    );
}

#[test]
fn test_validate_split_accepts_exact_sum() {
    assert!(AllocationService::validate_split(&BudgetSplit::default()).is_ok());
}

#[test]
fn test_validate_split_accepts_within_tolerance() {
    assert!(AllocationService::validate_split(&split(dec!(33.33), dec!(33.33), dec!(33.33))).is_ok());
}

#[test]
fn test_validate_split_rejects_bad_sum() {
    let result = AllocationService::validate_split(&split(dec!(50), dec!(30), dec!(30)));
    assert_eq!(
        result,
        Err(AllocationError::InvalidPercentageSum { total: dec!(110) })
    );
}

#[test]
fn test_validate_split_rejects_negative() {
    let result = AllocationService::validate_split(&split(dec!(120), dec!(-20), dec!(0)));
    assert_eq!(
        result,
        Err(AllocationError::NegativePercent { value: dec!(-20) })
    );
}

#[test]
fn test_monthly_summary_assembly() {
    let period = Period::new(8, 2026).unwrap();
    let actuals = GroupActuals {
        essentials: dec!(2000),
        leisure: dec!(1600),
        investment: dec!(300),
    };
    let summary = AllocationService::monthly_summary(
        period,
        dec!(5000),
        dec!(3900),
        actuals,
        dec!(12500),
        &BudgetSplit::default(),
    );

    assert_eq!(summary.month, 8);
    assert_eq!(summary.year, 2026);
    assert_eq!(summary.ideal_essentials, dec!(2500));
    assert_eq!(summary.essentials_utilization_percent, dec!(80));
    assert_eq!(summary.essentials_status, UtilizationStatus::Warning);
    assert_eq!(summary.ideal_leisure, dec!(1500));
    assert_eq!(summary.leisure_status, UtilizationStatus::Over);
    assert_eq!(summary.ideal_investment, dec!(1000));
    assert_eq!(summary.investment_status, UtilizationStatus::Good);
    assert_eq!(summary.remaining_balance, dec!(1100));
    assert_eq!(summary.net_worth, dec!(12500));
}

#[test]
fn test_monthly_summary_is_idempotent() {
    let period = Period::new(1, 2026).unwrap();
    let actuals = GroupActuals {
        essentials: dec!(10),
        leisure: dec!(20),
        investment: dec!(30),
    };
    let first = AllocationService::monthly_summary(
        period,
        dec!(100),
        dec!(60),
        actuals,
        dec!(0),
        &BudgetSplit::default(),
    );
    let second = AllocationService::monthly_summary(
        period,
        dec!(100),
        dec!(60),
        actuals,
        dec!(0),
        &BudgetSplit::default(),
    );
    assert_eq!(first, second);
}

#[test]
fn test_summary_wire_field_names() {
    let period = Period::new(2, 2026).unwrap();
    let summary = AllocationService::monthly_summary(
        period,
        dec!(1000),
        dec!(0),
        GroupActuals::default(),
        dec!(0),
        &BudgetSplit::default(),
    );
    let json = serde_json::to_value(&summary).unwrap();
    assert!(json.get("ideal_fixos").is_some());
    assert!(json.get("real_lazer").is_some());
    assert!(json.get("ideal_invest").is_some());
    assert_eq!(json["fixos_status"], "good");
}

#[test]
fn test_expense_group_parses_known_values() {
    assert_eq!(
        "essentials".parse::<ExpenseGroup>().unwrap(),
        ExpenseGroup::Essentials
    );
    assert_eq!(
        "Leisure".parse::<ExpenseGroup>().unwrap(),
        ExpenseGroup::Leisure
    );
    assert_eq!(
        "investment".parse::<ExpenseGroup>().unwrap(),
        ExpenseGroup::Investment
    );
}

#[test]
fn test_expense_group_rejects_unknown_values() {
    assert!("miscellaneous".parse::<ExpenseGroup>().is_err());
    assert!("".parse::<ExpenseGroup>().is_err());
}
