//! Income repository.
//!
//! Income mutations adjust the cached balance of the affected account in
//! the same database transaction.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{accounts, incomes};
use crate::repositories::account::{AccountError, AccountRepository};
use crate::repositories::expense::ExpenseFilter;

/// Error types for income operations.
#[derive(Debug, thiserror::Error)]
pub enum IncomeError {
    /// Income not found.
    #[error("income not found: {0}")]
    NotFound(Uuid),

    /// Resolving the target account failed.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or updating an income.
#[derive(Debug, Clone)]
pub struct CreateIncomeInput {
    /// Where the money came from.
    pub description: String,
    /// Amount received.
    pub amount: Decimal,
    /// Income date; defaults to today when absent.
    pub date: Option<NaiveDate>,
    /// Credited account; the default wallet is used when absent.
    pub account_id: Option<Uuid>,
}

/// Income repository.
#[derive(Debug, Clone)]
pub struct IncomeRepository {
    db: DatabaseConnection,
}

impl IncomeRepository {
    /// Creates a new income repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an income and credits the target account.
    pub async fn create_income(
        &self,
        user_id: Uuid,
        input: CreateIncomeInput,
    ) -> Result<incomes::Model, IncomeError> {
        let account_id = self.resolve_account(user_id, input.account_id).await?;
        let date = input
            .date
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        let txn = self.db.begin().await?;

        let income = incomes::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            account_id: Set(account_id),
            description: Set(input.description),
            amount: Set(input.amount),
            date: Set(date),
            month: Set(month_of(date)),
            year: Set(date.year()),
            created_at: Set(chrono::Utc::now().into()),
        };
        let income = income.insert(&txn).await?;

        adjust_account(&txn, user_id, account_id, income.amount).await?;

        txn.commit().await?;
        Ok(income)
    }

    /// Lists a user's incomes, newest first, optionally narrowed to a month
    /// and/or year.
    pub async fn list_incomes(
        &self,
        user_id: Uuid,
        filter: ExpenseFilter,
    ) -> Result<Vec<incomes::Model>, IncomeError> {
        let mut query = incomes::Entity::find().filter(incomes::Column::UserId.eq(user_id));

        if let Some(month) = filter.month {
            query = query.filter(incomes::Column::Month.eq(i32::try_from(month).unwrap_or_default()));
        }
        if let Some(year) = filter.year {
            query = query.filter(incomes::Column::Year.eq(year));
        }

        Ok(query
            .order_by_desc(incomes::Column::Date)
            .all(&self.db)
            .await?)
    }

    /// Rewrites an income and shifts the balance adjustment from the old
    /// account to the new one.
    pub async fn update_income(
        &self,
        user_id: Uuid,
        income_id: Uuid,
        input: CreateIncomeInput,
    ) -> Result<incomes::Model, IncomeError> {
        let account_id = self.resolve_account(user_id, input.account_id).await?;
        let date = input
            .date
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        let txn = self.db.begin().await?;

        let existing = incomes::Entity::find_by_id(income_id)
            .filter(incomes::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(IncomeError::NotFound(income_id))?;

        let old_amount = existing.amount;
        let old_account_id = existing.account_id;

        let mut active: incomes::ActiveModel = existing.into();
        active.description = Set(input.description);
        active.amount = Set(input.amount);
        active.date = Set(date);
        active.month = Set(month_of(date));
        active.year = Set(date.year());
        active.account_id = Set(account_id);
        let updated = active.update(&txn).await?;

        adjust_account(&txn, user_id, old_account_id, -old_amount).await?;
        adjust_account(&txn, user_id, account_id, updated.amount).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes an income and debits the amount back off its account.
    pub async fn delete_income(&self, user_id: Uuid, income_id: Uuid) -> Result<(), IncomeError> {
        let txn = self.db.begin().await?;

        let existing = incomes::Entity::find_by_id(income_id)
            .filter(incomes::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(IncomeError::NotFound(income_id))?;

        let amount = existing.amount;
        let account_id = existing.account_id;

        incomes::Entity::delete_by_id(income_id).exec(&txn).await?;
        adjust_account(&txn, user_id, account_id, -amount).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Picks the explicit account or falls back to the default wallet.
    async fn resolve_account(
        &self,
        user_id: Uuid,
        account_id: Option<Uuid>,
    ) -> Result<Uuid, AccountError> {
        match account_id {
            Some(id) => Ok(id),
            None => {
                let account_repo = AccountRepository::new(self.db.clone());
                Ok(account_repo.get_or_create_default(user_id).await?.id)
            }
        }
    }
}

fn month_of(date: NaiveDate) -> i32 {
    i32::try_from(date.month()).unwrap_or_default()
}

async fn adjust_account(
    txn: &sea_orm::DatabaseTransaction,
    user_id: Uuid,
    account_id: Uuid,
    delta: Decimal,
) -> Result<(), DbErr> {
    accounts::Entity::update_many()
        .col_expr(
            accounts::Column::Balance,
            Expr::col(accounts::Column::Balance).add(delta),
        )
        .filter(accounts::Column::Id.eq(account_id))
        .filter(accounts::Column::UserId.eq(user_id))
        .exec(txn)
        .await?;
    Ok(())
}
