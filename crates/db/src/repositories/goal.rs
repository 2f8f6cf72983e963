//! Goal repository.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, NullOrdering};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use fintrack_core::goal::is_reached;

use crate::entities::{accounts, goals};

/// Error types for goal operations.
#[derive(Debug, thiserror::Error)]
pub enum GoalError {
    /// Goal not found.
    #[error("goal not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a goal.
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    /// Goal name.
    pub name: String,
    /// Amount to save.
    pub target_amount: Decimal,
    /// Amount already saved.
    pub current_amount: Decimal,
    /// Optional target date.
    pub deadline: Option<NaiveDate>,
}

/// Input for updating a goal.
pub type UpdateGoalInput = CreateGoalInput;

/// Goal repository.
#[derive(Debug, Clone)]
pub struct GoalRepository {
    db: DatabaseConnection,
}

impl GoalRepository {
    /// Creates a new goal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a goal.
    pub async fn create_goal(
        &self,
        user_id: Uuid,
        input: CreateGoalInput,
    ) -> Result<goals::Model, GoalError> {
        let goal = goals::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            name: Set(input.name),
            target_amount: Set(input.target_amount),
            current_amount: Set(input.current_amount),
            deadline: Set(input.deadline),
            completed_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(goal.insert(&self.db).await?)
    }

    /// Lists a user's goals, in-progress goals first, newest first within
    /// each bucket.
    pub async fn list_goals(&self, user_id: Uuid) -> Result<Vec<goals::Model>, GoalError> {
        Ok(goals::Entity::find()
            .filter(goals::Column::UserId.eq(user_id))
            .order_by_with_nulls(goals::Column::CompletedAt, Order::Asc, NullOrdering::First)
            .order_by_desc(goals::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Rewrites a goal, marking or clearing completion based on the new
    /// amounts.
    pub async fn update_goal(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        input: UpdateGoalInput,
    ) -> Result<goals::Model, GoalError> {
        let existing = goals::Entity::find_by_id(goal_id)
            .filter(goals::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(GoalError::NotFound(goal_id))?;

        let completed_at = if is_reached(input.current_amount, input.target_amount) {
            Some(chrono::Utc::now().into())
        } else {
            None
        };

        let mut active: goals::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.target_amount = Set(input.target_amount);
        active.current_amount = Set(input.current_amount);
        active.deadline = Set(input.deadline);
        active.completed_at = Set(completed_at);

        Ok(active.update(&self.db).await?)
    }

    /// Adds money to a goal and debits the funding account, atomically.
    pub async fn add_money(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        amount: Decimal,
        account_id: Uuid,
    ) -> Result<goals::Model, GoalError> {
        let txn = self.db.begin().await?;

        let existing = goals::Entity::find_by_id(goal_id)
            .filter(goals::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(GoalError::NotFound(goal_id))?;

        let new_current = existing.current_amount + amount;
        let completed_at = if is_reached(new_current, existing.target_amount) {
            Some(chrono::Utc::now().into())
        } else {
            None
        };

        let mut active: goals::ActiveModel = existing.into();
        active.current_amount = Set(new_current);
        active.completed_at = Set(completed_at);
        let updated = active.update(&txn).await?;

        accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Balance,
                Expr::col(accounts::Column::Balance).sub(amount),
            )
            .filter(accounts::Column::Id.eq(account_id))
            .filter(accounts::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a goal.
    pub async fn delete_goal(&self, user_id: Uuid, goal_id: Uuid) -> Result<(), GoalError> {
        let existing = goals::Entity::find_by_id(goal_id)
            .filter(goals::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(GoalError::NotFound(goal_id))?;

        goals::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
