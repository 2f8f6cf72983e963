//! Allocation data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The three-way budget split, as percentages of monthly income.
///
/// Wire field names match the preferences API payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSplit {
    /// Percent of income reserved for essential expenses.
    #[serde(rename = "expenses_percent")]
    pub essentials_percent: Decimal,
    /// Percent of income reserved for leisure.
    #[serde(rename = "entertainment_percent")]
    pub leisure_percent: Decimal,
    /// Percent of income reserved for investments.
    #[serde(rename = "investment_percent")]
    pub investment_percent: Decimal,
}

impl Default for BudgetSplit {
    /// The classic 50/30/20 split.
    fn default() -> Self {
        Self {
            essentials_percent: Decimal::from(50),
            leisure_percent: Decimal::from(30),
            investment_percent: Decimal::from(20),
        }
    }
}

impl BudgetSplit {
    /// Sum of the three components.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.essentials_percent + self.leisure_percent + self.investment_percent
    }
}

/// Expense group an expense is tagged with.
///
/// A closed enumeration: unknown values are rejected at the boundary rather
/// than passed through as free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseGroup {
    /// Essential spending (rent, groceries, bills).
    Essentials,
    /// Leisure spending.
    Leisure,
    /// Investment contributions.
    Investment,
}

impl ExpenseGroup {
    /// All groups, in split order.
    pub const ALL: [Self; 3] = [Self::Essentials, Self::Leisure, Self::Investment];
}

impl std::fmt::Display for ExpenseGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Essentials => write!(f, "essentials"),
            Self::Leisure => write!(f, "leisure"),
            Self::Investment => write!(f, "investment"),
        }
    }
}

impl std::str::FromStr for ExpenseGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "essentials" => Ok(Self::Essentials),
            "leisure" => Ok(Self::Leisure),
            "investment" => Ok(Self::Investment),
            _ => Err(format!("Unknown expense group: {s}")),
        }
    }
}

/// Status tier derived from utilization thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationStatus {
    /// Under 80% of the ideal ceiling.
    Good,
    /// Between 80% and 100% of the ideal ceiling.
    Warning,
    /// Over the ideal ceiling.
    Over,
}

/// Ideal spending ceilings for one month, one per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdealCeilings {
    /// Ceiling for essential spending.
    pub essentials: Decimal,
    /// Ceiling for leisure spending.
    pub leisure: Decimal,
    /// Ceiling for investment contributions.
    pub investment: Decimal,
}

/// Actual summed spend per group for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupActuals {
    /// Essential spending total.
    pub essentials: Decimal,
    /// Leisure spending total.
    pub leisure: Decimal,
    /// Investment contribution total.
    pub investment: Decimal,
}

/// Ideal-vs-actual comparison for a single group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAllocation {
    /// Ideal spending ceiling.
    pub ideal: Decimal,
    /// Actual summed spend.
    pub actual: Decimal,
    /// Percent of the ceiling consumed (0 when the ceiling is 0).
    pub utilization_percent: Decimal,
    /// Status tier for the utilization.
    pub status: UtilizationStatus,
}

/// Monthly summary: period totals, per-group ideal vs actual, utilization,
/// and remaining balance.
///
/// Wire field names for the per-group amounts follow the summary API payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Month number (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Total income for the period.
    pub income_total: Decimal,
    /// Total expenses for the period.
    pub expense_total: Decimal,
    /// Ideal ceiling for essential spending.
    #[serde(rename = "ideal_fixos")]
    pub ideal_essentials: Decimal,
    /// Actual essential spending.
    #[serde(rename = "real_fixos")]
    pub real_essentials: Decimal,
    /// Percent of the essentials ceiling consumed.
    #[serde(rename = "fixos_utilization_percent")]
    pub essentials_utilization_percent: Decimal,
    /// Status tier for essentials.
    #[serde(rename = "fixos_status")]
    pub essentials_status: UtilizationStatus,
    /// Ideal ceiling for leisure spending.
    #[serde(rename = "ideal_lazer")]
    pub ideal_leisure: Decimal,
    /// Actual leisure spending.
    #[serde(rename = "real_lazer")]
    pub real_leisure: Decimal,
    /// Percent of the leisure ceiling consumed.
    #[serde(rename = "lazer_utilization_percent")]
    pub leisure_utilization_percent: Decimal,
    /// Status tier for leisure.
    #[serde(rename = "lazer_status")]
    pub leisure_status: UtilizationStatus,
    /// Ideal ceiling for investment contributions.
    #[serde(rename = "ideal_invest")]
    pub ideal_investment: Decimal,
    /// Actual investment contributions.
    #[serde(rename = "real_invest")]
    pub real_investment: Decimal,
    /// Percent of the investment ceiling consumed.
    #[serde(rename = "invest_utilization_percent")]
    pub investment_utilization_percent: Decimal,
    /// Status tier for investments.
    #[serde(rename = "invest_status")]
    pub investment_status: UtilizationStatus,
    /// Income minus expenses; negative values signal overspend.
    pub remaining_balance: Decimal,
    /// Sum of all account balances.
    pub net_worth: Decimal,
}
