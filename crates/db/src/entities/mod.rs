//! `SeaORM` entity definitions.

pub mod accounts;
pub mod expenses;
pub mod goals;
pub mod incomes;
pub mod sea_orm_active_enums;
pub mod transfers;
pub mod user_preferences;
pub mod users;
