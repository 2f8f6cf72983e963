//! Summary repository: per-period aggregates feeding the allocation
//! calculator.

use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect,
};
use uuid::Uuid;

use fintrack_core::allocation::{ExpenseGroup, GroupActuals};
use fintrack_shared::Period;

use crate::entities::{accounts, expenses, incomes, sea_orm_active_enums};

/// Error types for summary queries.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Copy)]
pub struct MonthTotals {
    /// The month the totals cover.
    pub period: Period,
    /// Income total.
    pub income: Decimal,
    /// Expense total.
    pub expenses: Decimal,
}

/// Per-category expense total within a group.
#[derive(Debug, Clone)]
pub struct BreakdownRow {
    /// Budget group.
    pub group: ExpenseGroup,
    /// Category label.
    pub category: String,
    /// Summed amount.
    pub total: Decimal,
}

/// Summary repository.
#[derive(Debug, Clone)]
pub struct SummaryRepository {
    db: DatabaseConnection,
}

impl SummaryRepository {
    /// Creates a new summary repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Total income for a user in a period.
    pub async fn income_total(&self, user_id: Uuid, period: Period) -> Result<Decimal, SummaryError> {
        let amounts: Vec<Decimal> = incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(user_id))
            .filter(incomes::Column::Month.eq(month_i32(period)))
            .filter(incomes::Column::Year.eq(period.year))
            .select_only()
            .column(incomes::Column::Amount)
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(amounts.iter().copied().sum())
    }

    /// Total expenses for a user in a period.
    pub async fn expense_total(
        &self,
        user_id: Uuid,
        period: Period,
    ) -> Result<Decimal, SummaryError> {
        let amounts: Vec<Decimal> = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .filter(expenses::Column::Month.eq(month_i32(period)))
            .filter(expenses::Column::Year.eq(period.year))
            .select_only()
            .column(expenses::Column::Amount)
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(amounts.iter().copied().sum())
    }

    /// Expense totals per budget group for a user in a period.
    pub async fn group_actuals(
        &self,
        user_id: Uuid,
        period: Period,
    ) -> Result<GroupActuals, SummaryError> {
        let rows: Vec<(sea_orm_active_enums::ExpenseGroup, Decimal)> = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .filter(expenses::Column::Month.eq(month_i32(period)))
            .filter(expenses::Column::Year.eq(period.year))
            .select_only()
            .column(expenses::Column::Group)
            .column(expenses::Column::Amount)
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut actuals = GroupActuals::default();
        for (group, amount) in rows {
            match ExpenseGroup::from(group) {
                ExpenseGroup::Essentials => actuals.essentials += amount,
                ExpenseGroup::Leisure => actuals.leisure += amount,
                ExpenseGroup::Investment => actuals.investment += amount,
            }
        }
        Ok(actuals)
    }

    /// Sum of all cached account balances for a user.
    pub async fn net_worth(&self, user_id: Uuid) -> Result<Decimal, SummaryError> {
        let balances: Vec<Decimal> = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .select_only()
            .column(accounts::Column::Balance)
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(balances.iter().copied().sum())
    }

    /// Income/expense totals for each given period, in input order.
    pub async fn monthly_history(
        &self,
        user_id: Uuid,
        periods: &[Period],
    ) -> Result<Vec<MonthTotals>, SummaryError> {
        let mut totals = Vec::with_capacity(periods.len());
        for &period in periods {
            let income = self.income_total(user_id, period).await?;
            let expenses = self.expense_total(user_id, period).await?;
            totals.push(MonthTotals {
                period,
                income,
                expenses,
            });
        }
        Ok(totals)
    }

    /// Per-group, per-category expense totals for a period, largest first
    /// within each group.
    pub async fn expense_breakdown(
        &self,
        user_id: Uuid,
        period: Period,
    ) -> Result<Vec<BreakdownRow>, SummaryError> {
        let rows: Vec<(sea_orm_active_enums::ExpenseGroup, String, Decimal)> =
            expenses::Entity::find()
                .filter(expenses::Column::UserId.eq(user_id))
                .filter(expenses::Column::Month.eq(month_i32(period)))
                .filter(expenses::Column::Year.eq(period.year))
                .select_only()
                .column(expenses::Column::Group)
                .column(expenses::Column::Category)
                .column(expenses::Column::Amount)
                .into_tuple()
                .all(&self.db)
                .await?;

        let mut folded: Vec<BreakdownRow> = Vec::new();
        for (group, category, amount) in rows {
            let group = ExpenseGroup::from(group);
            if let Some(row) = folded
                .iter_mut()
                .find(|r| r.group == group && r.category == category)
            {
                row.total += amount;
            } else {
                folded.push(BreakdownRow {
                    group,
                    category,
                    total: amount,
                });
            }
        }

        folded.sort_by(|a, b| {
            a.group
                .to_string()
                .cmp(&b.group.to_string())
                .then(b.total.cmp(&a.total))
        });
        Ok(folded)
    }
}

fn month_i32(period: Period) -> i32 {
    i32::try_from(period.month).unwrap_or_default()
}
