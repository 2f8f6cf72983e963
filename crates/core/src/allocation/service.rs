//! Allocation service: ideal ceilings, utilization, and summary assembly.

use rust_decimal::Decimal;

use fintrack_shared::Period;

use super::error::AllocationError;
use super::types::{
    BudgetSplit, GroupActuals, GroupAllocation, IdealCeilings, MonthlySummary, UtilizationStatus,
};

/// Tolerance for the percentage-sum invariant.
const SPLIT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

/// Allocation service for budget split math.
pub struct AllocationService;

impl AllocationService {
    /// Computes the three ideal spending ceilings from a monthly income total.
    ///
    /// Each ceiling is `income_total * percent / 100`. A zero percent yields a
    /// zero ceiling. The split is assumed valid (callers validate via
    /// [`AllocationService::validate_split`] before saving); this operation
    /// does not re-validate.
    #[must_use]
    pub fn ideal_ceilings(income_total: Decimal, split: &BudgetSplit) -> IdealCeilings {
        let hundred = Decimal::ONE_HUNDRED;
        IdealCeilings {
            essentials: income_total * split.essentials_percent / hundred,
            leisure: income_total * split.leisure_percent / hundred,
            investment: income_total * split.investment_percent / hundred,
        }
    }

    /// Percent of an ideal ceiling consumed by actual spend, rounded to 2dp.
    ///
    /// Returns 0 when the ceiling is 0 so a zeroed-out group never produces
    /// a division by zero.
    #[must_use]
    pub fn utilization(ideal: Decimal, actual: Decimal) -> Decimal {
        if ideal.is_zero() {
            Decimal::ZERO
        } else {
            (actual / ideal * Decimal::ONE_HUNDRED).round_dp(2)
        }
    }

    /// Status tier for a utilization percentage.
    ///
    /// `Good` below 80, `Warning` from 80 through 100 inclusive, `Over` above.
    #[must_use]
    pub fn status(utilization_percent: Decimal) -> UtilizationStatus {
        if utilization_percent < Decimal::from(80) {
            UtilizationStatus::Good
        } else if utilization_percent <= Decimal::ONE_HUNDRED {
            UtilizationStatus::Warning
        } else {
            UtilizationStatus::Over
        }
    }

    /// Combines a ceiling and an actual into a full group allocation.
    #[must_use]
    pub fn allocate(ideal: Decimal, actual: Decimal) -> GroupAllocation {
        let utilization_percent = Self::utilization(ideal, actual);
        GroupAllocation {
            ideal,
            actual,
            utilization_percent,
            status: Self::status(utilization_percent),
        }
    }

    /// Income minus expenses. Negative values are valid and signal overspend;
    /// no clamping is applied.
    #[must_use]
    pub fn remaining_balance(income_total: Decimal, expense_total: Decimal) -> Decimal {
        income_total - expense_total
    }

    /// Validates a budget split before it is saved.
    ///
    /// # Errors
    ///
    /// Returns `AllocationError::NegativePercent` if any component is negative,
    /// or `AllocationError::InvalidPercentageSum` if the components do not
    /// total 100 within a tolerance of 0.01.
    pub fn validate_split(split: &BudgetSplit) -> Result<(), AllocationError> {
        for value in [
            split.essentials_percent,
            split.leisure_percent,
            split.investment_percent,
        ] {
            if value.is_sign_negative() {
                return Err(AllocationError::NegativePercent { value });
            }
        }

        let total = split.total();
        if (total - Decimal::ONE_HUNDRED).abs() > SPLIT_TOLERANCE {
            return Err(AllocationError::InvalidPercentageSum { total });
        }

        Ok(())
    }

    /// Assembles the monthly summary from aggregated totals and the split.
    ///
    /// Pure and stateless: identical inputs always produce identical output.
    #[must_use]
    pub fn monthly_summary(
        period: Period,
        income_total: Decimal,
        expense_total: Decimal,
        actuals: GroupActuals,
        net_worth: Decimal,
        split: &BudgetSplit,
    ) -> MonthlySummary {
        let ideals = Self::ideal_ceilings(income_total, split);
        let essentials = Self::allocate(ideals.essentials, actuals.essentials);
        let leisure = Self::allocate(ideals.leisure, actuals.leisure);
        let investment = Self::allocate(ideals.investment, actuals.investment);

        MonthlySummary {
            month: period.month,
            year: period.year,
            income_total,
            expense_total,
            ideal_essentials: essentials.ideal,
            real_essentials: essentials.actual,
            essentials_utilization_percent: essentials.utilization_percent,
            essentials_status: essentials.status,
            ideal_leisure: leisure.ideal,
            real_leisure: leisure.actual,
            leisure_utilization_percent: leisure.utilization_percent,
            leisure_status: leisure.status,
            ideal_investment: investment.ideal,
            real_investment: investment.actual,
            investment_utilization_percent: investment.utilization_percent,
            investment_status: investment.status,
            remaining_balance: Self::remaining_balance(income_total, expense_total),
            net_worth,
        }
    }
}
