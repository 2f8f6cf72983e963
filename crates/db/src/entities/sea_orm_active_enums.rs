//! Database enum mappings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of account a user holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Checking account.
    #[sea_orm(string_value = "checking")]
    Checking,
    /// Savings account.
    #[sea_orm(string_value = "savings")]
    Savings,
    /// Credit card.
    #[sea_orm(string_value = "card")]
    Card,
    /// Investment account.
    #[sea_orm(string_value = "investment")]
    Investment,
}

/// Expense group column, mirroring [`fintrack_core::allocation::ExpenseGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "expense_group")]
#[serde(rename_all = "snake_case")]
pub enum ExpenseGroup {
    /// Essential spending.
    #[sea_orm(string_value = "essentials")]
    Essentials,
    /// Leisure spending.
    #[sea_orm(string_value = "leisure")]
    Leisure,
    /// Investment contributions.
    #[sea_orm(string_value = "investment")]
    Investment,
}

impl From<fintrack_core::allocation::ExpenseGroup> for ExpenseGroup {
    fn from(group: fintrack_core::allocation::ExpenseGroup) -> Self {
        match group {
            fintrack_core::allocation::ExpenseGroup::Essentials => Self::Essentials,
            fintrack_core::allocation::ExpenseGroup::Leisure => Self::Leisure,
            fintrack_core::allocation::ExpenseGroup::Investment => Self::Investment,
        }
    }
}

impl From<ExpenseGroup> for fintrack_core::allocation::ExpenseGroup {
    fn from(group: ExpenseGroup) -> Self {
        match group {
            ExpenseGroup::Essentials => Self::Essentials,
            ExpenseGroup::Leisure => Self::Leisure,
            ExpenseGroup::Investment => Self::Investment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintrack_core::allocation::ExpenseGroup as CoreGroup;

    #[test]
    fn test_group_roundtrip() {
        for group in CoreGroup::ALL {
            let db_group = ExpenseGroup::from(group);
            assert_eq!(CoreGroup::from(db_group), group);
        }
    }
}
