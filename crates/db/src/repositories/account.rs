//! Account repository for account management and transfers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use fintrack_core::account::{BalanceComponents, TransferError, derived_balance, validate_transfer};

use crate::entities::{accounts, expenses, incomes, sea_orm_active_enums::AccountType, transfers};

/// Name of the wallet created automatically for unassigned transactions.
pub const DEFAULT_WALLET_NAME: &str = "General Wallet";

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("account not found: {0}")]
    NotFound(Uuid),

    /// One of the transfer accounts is missing or not owned by the user.
    #[error("invalid transfer accounts")]
    InvalidTransferAccounts,

    /// The default wallet cannot be deleted.
    #[error("the default wallet cannot be deleted")]
    ProtectedDefault,

    /// Transfer rule violation.
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account with its derived balance.
#[derive(Debug, Clone)]
pub struct AccountWithBalance {
    /// The account record.
    pub account: accounts::Model,
    /// Balance derived from opening balance and transaction history.
    pub balance: Decimal,
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Owning user.
    pub user_id: Uuid,
    /// Display name.
    pub name: String,
    /// Account kind.
    pub account_type: AccountType,
    /// Opening balance; when zero, `balance` stands in.
    pub opening_balance: Decimal,
    /// Balance as supplied by older clients that predate opening balances.
    pub balance: Decimal,
}

/// Input for updating an account.
#[derive(Debug, Clone)]
pub struct UpdateAccountInput {
    /// Display name.
    pub name: String,
    /// Account kind.
    pub account_type: AccountType,
    /// Opening balance; when zero, `balance` stands in.
    pub opening_balance: Decimal,
    /// Balance fallback for the opening balance.
    pub balance: Decimal,
}

/// Input for a transfer between two accounts.
#[derive(Debug, Clone)]
pub struct TransferInput {
    /// Owning user.
    pub user_id: Uuid,
    /// Origin account.
    pub from_account_id: Uuid,
    /// Destination account.
    pub to_account_id: Uuid,
    /// Amount to move.
    pub amount: Decimal,
    /// Optional note.
    pub description: Option<String>,
    /// Transfer date; defaults to today when absent.
    pub date: Option<NaiveDate>,
}

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account. The stored balance starts at the effective
    /// opening balance.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let opening = fintrack_core::account::effective_opening(input.opening_balance, input.balance);

        let account = accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(input.user_id),
            name: Set(input.name),
            account_type: Set(input.account_type),
            balance: Set(opening),
            opening_balance: Set(opening),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(account.insert(&self.db).await?)
    }

    /// Lists a user's accounts, newest first, with balances derived from
    /// transaction history rather than the cached column.
    pub async fn list_with_balances(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AccountWithBalance>, AccountError> {
        let rows = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .order_by_desc(accounts::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut result = Vec::with_capacity(rows.len());
        for account in rows {
            let components = self.balance_components(&account).await?;
            let balance = derived_balance(&components);
            result.push(AccountWithBalance { account, balance });
        }

        Ok(result)
    }

    /// Finds one account owned by the user.
    pub async fn find_owned(
        &self,
        user_id: Uuid,
        account_id: Uuid,
    ) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(account_id)
            .filter(accounts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(account_id))
    }

    /// Updates name, type, and opening balance, then recalculates the cached
    /// balance from history.
    pub async fn update_account(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let account = self.find_owned(user_id, account_id).await?;
        let opening = fintrack_core::account::effective_opening(input.opening_balance, input.balance);

        let mut active: accounts::ActiveModel = account.into();
        active.name = Set(input.name);
        active.account_type = Set(input.account_type);
        active.opening_balance = Set(opening);
        active.balance = Set(opening);
        active.update(&self.db).await?;

        self.recalculate_balance(user_id, account_id).await?;
        self.find_owned(user_id, account_id).await
    }

    /// Deletes an account. The default wallet is protected.
    pub async fn delete_account(&self, user_id: Uuid, account_id: Uuid) -> Result<(), AccountError> {
        let account = self.find_owned(user_id, account_id).await?;

        if account.name == DEFAULT_WALLET_NAME {
            return Err(AccountError::ProtectedDefault);
        }

        accounts::Entity::delete_by_id(account.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Finds the user's default wallet, creating it when missing.
    ///
    /// Expenses and incomes posted without an account land here.
    pub async fn get_or_create_default(&self, user_id: Uuid) -> Result<accounts::Model, AccountError> {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .filter(accounts::Column::Name.eq(DEFAULT_WALLET_NAME))
            .order_by_asc(accounts::Column::CreatedAt)
            .one(&self.db)
            .await?;

        if let Some(account) = existing {
            return Ok(account);
        }

        let wallet = accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            name: Set(DEFAULT_WALLET_NAME.to_string()),
            account_type: Set(AccountType::Checking),
            balance: Set(Decimal::ZERO),
            opening_balance: Set(Decimal::ZERO),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(wallet.insert(&self.db).await?)
    }

    /// Moves money between two accounts owned by the user.
    ///
    /// Transfers never touch income or expense totals. The origin account
    /// must hold enough derived balance.
    pub async fn transfer(&self, input: TransferInput) -> Result<(), AccountError> {
        let owned = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(input.user_id))
            .filter(
                accounts::Column::Id.is_in([input.from_account_id, input.to_account_id]),
            )
            .all(&self.db)
            .await?;

        let origin = owned
            .iter()
            .find(|a| a.id == input.from_account_id)
            .cloned();
        let destination_exists = owned.iter().any(|a| a.id == input.to_account_id);

        // Same-account transfers fall through to the rule check below.
        let available = if let Some(origin) = origin {
            if !destination_exists && input.from_account_id != input.to_account_id {
                return Err(AccountError::InvalidTransferAccounts);
            }
            let components = self.balance_components(&origin).await?;
            derived_balance(&components)
        } else {
            return Err(AccountError::InvalidTransferAccounts);
        };

        validate_transfer(
            input.from_account_id,
            input.to_account_id,
            input.amount,
            available,
        )?;

        let date = input
            .date
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        let txn = self.db.begin().await?;
        let transfer = transfers::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(input.user_id),
            from_account_id: Set(input.from_account_id),
            to_account_id: Set(input.to_account_id),
            amount: Set(input.amount),
            description: Set(input.description),
            date: Set(date),
            created_at: Set(chrono::Utc::now().into()),
        };
        transfer.insert(&txn).await?;
        txn.commit().await?;

        self.recalculate_balance(input.user_id, input.from_account_id)
            .await?;
        self.recalculate_balance(input.user_id, input.to_account_id)
            .await?;

        Ok(())
    }

    /// Rewrites the cached balance column from transaction history.
    pub async fn recalculate_balance(
        &self,
        user_id: Uuid,
        account_id: Uuid,
    ) -> Result<(), AccountError> {
        let account = self.find_owned(user_id, account_id).await?;
        let components = self.balance_components(&account).await?;
        let balance = derived_balance(&components);

        debug!(account_id = %account_id, balance = %balance, "Recalculated account balance");

        let mut active: accounts::ActiveModel = account.into();
        active.balance = Set(balance);
        active.update(&self.db).await?;
        Ok(())
    }

    /// Gathers the aggregates that feed balance derivation.
    async fn balance_components(
        &self,
        account: &accounts::Model,
    ) -> Result<BalanceComponents, DbErr> {
        let incomes_total = sum_amounts(
            incomes::Entity::find()
                .filter(incomes::Column::UserId.eq(account.user_id))
                .filter(incomes::Column::AccountId.eq(account.id))
                .select_only()
                .column(incomes::Column::Amount)
                .into_tuple()
                .all(&self.db)
                .await?,
        );
        let expenses_total = sum_amounts(
            expenses::Entity::find()
                .filter(expenses::Column::UserId.eq(account.user_id))
                .filter(expenses::Column::AccountId.eq(account.id))
                .select_only()
                .column(expenses::Column::Amount)
                .into_tuple()
                .all(&self.db)
                .await?,
        );
        let transfers_in = sum_amounts(
            transfers::Entity::find()
                .filter(transfers::Column::UserId.eq(account.user_id))
                .filter(transfers::Column::ToAccountId.eq(account.id))
                .select_only()
                .column(transfers::Column::Amount)
                .into_tuple()
                .all(&self.db)
                .await?,
        );
        let transfers_out = sum_amounts(
            transfers::Entity::find()
                .filter(transfers::Column::UserId.eq(account.user_id))
                .filter(transfers::Column::FromAccountId.eq(account.id))
                .select_only()
                .column(transfers::Column::Amount)
                .into_tuple()
                .all(&self.db)
                .await?,
        );

        Ok(BalanceComponents {
            opening_balance: account.opening_balance,
            stored_balance: account.balance,
            incomes: incomes_total,
            expenses: expenses_total,
            transfers_in,
            transfers_out,
        })
    }
}

fn sum_amounts(amounts: Vec<Decimal>) -> Decimal {
    amounts.iter().copied().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sum_amounts() {
        assert_eq!(sum_amounts(vec![]), Decimal::ZERO);
        assert_eq!(
            sum_amounts(vec![dec!(10.50), dec!(4.25), dec!(0.25)]),
            dec!(15)
        );
    }
}
