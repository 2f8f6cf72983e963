//! Expense repository.
//!
//! Expense mutations adjust the cached balance of the affected account in
//! the same database transaction.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use fintrack_core::allocation::ExpenseGroup;

use crate::entities::{accounts, expenses};
use crate::repositories::account::{AccountError, AccountRepository};

/// Error types for expense operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    /// Expense not found.
    #[error("expense not found: {0}")]
    NotFound(Uuid),

    /// Resolving the target account failed.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or updating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// What was bought.
    pub description: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Category label within the group.
    pub category: String,
    /// Budget group tag.
    pub group: ExpenseGroup,
    /// Payment method label.
    pub payment_method: String,
    /// Expense date; defaults to today when absent.
    pub date: Option<NaiveDate>,
    /// Debited account; the default wallet is used when absent.
    pub account_id: Option<Uuid>,
}

/// Month/year filter for expense listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseFilter {
    /// Restrict to a month (1-12).
    pub month: Option<u32>,
    /// Restrict to a year.
    pub year: Option<i32>,
}

/// Expense repository.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an expense and debits the target account.
    pub async fn create_expense(
        &self,
        user_id: Uuid,
        input: CreateExpenseInput,
    ) -> Result<expenses::Model, ExpenseError> {
        let account_id = self.resolve_account(user_id, input.account_id).await?;
        let date = input
            .date
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        let txn = self.db.begin().await?;

        let expense = expenses::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            account_id: Set(account_id),
            description: Set(input.description),
            amount: Set(input.amount),
            category: Set(input.category),
            group: Set(input.group.into()),
            payment_method: Set(input.payment_method),
            date: Set(date),
            month: Set(month_of(date)),
            year: Set(date.year()),
            created_at: Set(chrono::Utc::now().into()),
        };
        let expense = expense.insert(&txn).await?;

        debit_account(&txn, user_id, account_id, expense.amount).await?;

        txn.commit().await?;
        Ok(expense)
    }

    /// Lists a user's expenses, newest first, optionally narrowed to a month
    /// and/or year.
    pub async fn list_expenses(
        &self,
        user_id: Uuid,
        filter: ExpenseFilter,
    ) -> Result<Vec<expenses::Model>, ExpenseError> {
        let mut query = expenses::Entity::find().filter(expenses::Column::UserId.eq(user_id));

        if let Some(month) = filter.month {
            query = query.filter(expenses::Column::Month.eq(i32::try_from(month).unwrap_or_default()));
        }
        if let Some(year) = filter.year {
            query = query.filter(expenses::Column::Year.eq(year));
        }

        Ok(query
            .order_by_desc(expenses::Column::Date)
            .all(&self.db)
            .await?)
    }

    /// Rewrites an expense and shifts the balance adjustment from the old
    /// account to the new one.
    pub async fn update_expense(
        &self,
        user_id: Uuid,
        expense_id: Uuid,
        input: CreateExpenseInput,
    ) -> Result<expenses::Model, ExpenseError> {
        let account_id = self.resolve_account(user_id, input.account_id).await?;
        let date = input
            .date
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        let txn = self.db.begin().await?;

        let existing = expenses::Entity::find_by_id(expense_id)
            .filter(expenses::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(ExpenseError::NotFound(expense_id))?;

        let old_amount = existing.amount;
        let old_account_id = existing.account_id;

        let mut active: expenses::ActiveModel = existing.into();
        active.description = Set(input.description);
        active.amount = Set(input.amount);
        active.category = Set(input.category);
        active.group = Set(input.group.into());
        active.payment_method = Set(input.payment_method);
        active.date = Set(date);
        active.month = Set(month_of(date));
        active.year = Set(date.year());
        active.account_id = Set(account_id);
        let updated = active.update(&txn).await?;

        credit_account(&txn, user_id, old_account_id, old_amount).await?;
        debit_account(&txn, user_id, account_id, updated.amount).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes an expense and credits the amount back to its account.
    pub async fn delete_expense(&self, user_id: Uuid, expense_id: Uuid) -> Result<(), ExpenseError> {
        let txn = self.db.begin().await?;

        let existing = expenses::Entity::find_by_id(expense_id)
            .filter(expenses::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(ExpenseError::NotFound(expense_id))?;

        let amount = existing.amount;
        let account_id = existing.account_id;

        expenses::Entity::delete_by_id(expense_id).exec(&txn).await?;
        credit_account(&txn, user_id, account_id, amount).await?;

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

async fn debit_account(
    txn: &sea_orm::DatabaseTransaction,
    user_id: Uuid,
    account_id: Uuid,
    amount: Decimal,
) -> Result<(), DbErr> {
    accounts::Entity::update_many()
        .col_expr(
            accounts::Column::Balance,
            Expr::col(accounts::Column::Balance).sub(amount),
        )
        .filter(accounts::Column::Id.eq(account_id))
        .filter(accounts::Column::UserId.eq(user_id))
        .exec(txn)
        .await?;
    Ok(())
}

async fn credit_account(
    txn: &sea_orm::DatabaseTransaction,
    user_id: Uuid,
    account_id: Uuid,
    amount: Decimal,
) -> Result<(), DbErr> {
    accounts::Entity::update_many()
        .col_expr(
            accounts::Column::Balance,
            Expr::col(accounts::Column::Balance).add(amount),
        )
        .filter(accounts::Column::Id.eq(account_id))
        .filter(accounts::Column::UserId.eq(user_id))
        .exec(txn)
        .await?;
    Ok(())
}
