//! Preferences repository for the budget split.

use fintrack_core::allocation::BudgetSplit;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::user_preferences;

/// Error types for preferences operations.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Preferences repository.
///
/// Split validation happens at the API boundary before any write; the
/// repository only stores values it is given.
#[derive(Debug, Clone)]
pub struct PreferencesRepository {
    db: DatabaseConnection,
}

impl PreferencesRepository {
    /// Creates a new preferences repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the stored split for a user, if any.
    pub async fn find_split(&self, user_id: Uuid) -> Result<Option<BudgetSplit>, PreferencesError> {
        let row = user_preferences::Entity::find()
            .filter(user_preferences::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(row.map(|prefs| BudgetSplit {
            essentials_percent: prefs.essentials_percent,
            leisure_percent: prefs.leisure_percent,
            investment_percent: prefs.investment_percent,
        }))
    }

    /// Returns the stored split, or the 50/30/20 default when none exists.
    pub async fn split_or_default(&self, user_id: Uuid) -> Result<BudgetSplit, PreferencesError> {
        Ok(self.find_split(user_id).await?.unwrap_or_default())
    }

    /// Stores the split for a user, updating an existing row or inserting one.
    pub async fn save_split(
        &self,
        user_id: Uuid,
        split: &BudgetSplit,
    ) -> Result<(), PreferencesError> {
        let now = chrono::Utc::now().into();
        let existing = user_preferences::Entity::find()
            .filter(user_preferences::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        if let Some(row) = existing {
            let mut prefs: user_preferences::ActiveModel = row.into();
            prefs.essentials_percent = Set(split.essentials_percent);
            prefs.leisure_percent = Set(split.leisure_percent);
            prefs.investment_percent = Set(split.investment_percent);
            prefs.updated_at = Set(now);
            prefs.update(&self.db).await?;
        } else {
            let prefs = user_preferences::ActiveModel {
                id: Set(Uuid::now_v7()),
                user_id: Set(user_id),
                essentials_percent: Set(split.essentials_percent),
                leisure_percent: Set(split.leisure_percent),
                investment_percent: Set(split.investment_percent),
                created_at: Set(now),
                updated_at: Set(now),
            };
            prefs.insert(&self.db).await?;
        }

        Ok(())
    }
}
