//! `SeaORM` Entity for user_preferences table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget split preferences, one row per user.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_preferences")]
pub struct Model {
    /// Row ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning user, unique.
    #[sea_orm(unique)]
    pub user_id: Uuid,
    /// Percent of income reserved for essential expenses.
    pub essentials_percent: Decimal,
    /// Percent of income reserved for leisure.
    pub leisure_percent: Decimal,
    /// Percent of income reserved for investments.
    pub investment_percent: Decimal,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning user.
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
