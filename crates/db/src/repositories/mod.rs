//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod expense;
pub mod goal;
pub mod income;
pub mod preferences;
pub mod summary;
pub mod user;

pub use account::{
    AccountError, AccountRepository, AccountWithBalance, CreateAccountInput, TransferInput,
    UpdateAccountInput,
};
pub use expense::{CreateExpenseInput, ExpenseError, ExpenseFilter, ExpenseRepository};
pub use goal::{CreateGoalInput, GoalError, GoalRepository, UpdateGoalInput};
pub use income::{CreateIncomeInput, IncomeError, IncomeRepository};
pub use preferences::{PreferencesError, PreferencesRepository};
pub use summary::{BreakdownRow, MonthTotals, SummaryError, SummaryRepository};
pub use user::{CreateUserInput, UserError, UserRepository};
