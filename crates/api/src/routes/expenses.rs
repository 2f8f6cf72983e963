//! Expense management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::app_error_response};
use fintrack_core::allocation::ExpenseGroup;
use fintrack_core::events::{ChangeEvent, DataDomain};
use fintrack_db::repositories::expense::{
    CreateExpenseInput, ExpenseError, ExpenseFilter, ExpenseRepository,
};
use fintrack_shared::AppError;

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses))
        .route("/expenses", post(create_expense))
        .route("/expenses/{expense_id}", put(update_expense))
        .route("/expenses/{expense_id}", delete(delete_expense))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating or updating an expense.
///
/// Unknown `group` values are rejected at deserialization; an absent group
/// defaults to essentials.
#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    /// What was bought.
    pub description: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Category label within the group.
    pub category: String,
    /// Budget group tag.
    pub group: Option<ExpenseGroup>,
    /// Payment method label.
    #[serde(default)]
    pub payment_method: String,
    /// Expense date, `YYYY-MM-DD`; defaults to today.
    pub date: Option<String>,
    /// Debited account; defaults to the default wallet.
    pub account_id: Option<Uuid>,
}

/// Month/year query filter.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict to a month (1-12).
    pub month: Option<u32>,
    /// Restrict to a year.
    pub year: Option<i32>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/expenses` - List expenses, newest first.
async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());
    let filter = ExpenseFilter {
        month: query.month,
        year: query.year,
    };

    match repo.list_expenses(auth.user_id(), filter).await {
        Ok(expenses) => (StatusCode::OK, Json(json!({ "expenses": expenses }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list expenses");
            map_expense_error(&e)
        }
    }
}

/// POST `/expenses` - Record an expense and debit its account.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ExpenseRequest>,
) -> impl IntoResponse {
    let input = match expense_input(payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let repo = ExpenseRepository::new((*state.db).clone());

    match repo.create_expense(auth.user_id(), input).await {
        Ok(expense) => {
            info!(expense_id = %expense.id, amount = %expense.amount, "Expense created");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Expenses,
            });

            (StatusCode::CREATED, Json(expense)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create expense");
            map_expense_error(&e)
        }
    }
}

/// PUT `/expenses/{expense_id}` - Rewrite an expense.
async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(expense_id): Path<Uuid>,
    Json(payload): Json<ExpenseRequest>,
) -> impl IntoResponse {
    let input = match expense_input(payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let repo = ExpenseRepository::new((*state.db).clone());

    match repo.update_expense(auth.user_id(), expense_id, input).await {
        Ok(expense) => {
            info!(expense_id = %expense_id, "Expense updated");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Expenses,
            });

            (StatusCode::OK, Json(expense)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update expense");
            map_expense_error(&e)
        }
    }
}

/// DELETE `/expenses/{expense_id}` - Delete an expense and credit back its
/// account.
async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(expense_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());

    match repo.delete_expense(auth.user_id(), expense_id).await {
        Ok(()) => {
            info!(expense_id = %expense_id, "Expense deleted");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Expenses,
            });
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete expense");
            map_expense_error(&e)
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Converts the request payload into repository input.
fn expense_input(payload: ExpenseRequest) -> Result<CreateExpenseInput, axum::response::Response> {
    let date = crate::routes::parse_optional_date(payload.date.as_deref())?;

    Ok(CreateExpenseInput {
        description: payload.description,
        amount: payload.amount,
        category: payload.category,
        group: payload.group.unwrap_or(ExpenseGroup::Essentials),
        payment_method: payload.payment_method,
        date,
        account_id: payload.account_id,
    })
}

/// Maps expense errors to HTTP responses.
fn map_expense_error(e: &ExpenseError) -> axum::response::Response {
    let app_error = match e {
        ExpenseError::NotFound(id) => AppError::NotFound(format!("Expense not found: {id}")),
        ExpenseError::Account(_) | ExpenseError::Database(_) => {
            AppError::Internal("An error occurred".to_string())
        }
    };
    app_error_response(&app_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_group_rejected() {
        let json = r#"{
            "description": "coffee",
            "amount": "4.50",
            "category": "eating out",
            "group": "misc"
        }"#;
        assert!(serde_json::from_str::<ExpenseRequest>(json).is_err());
    }

    #[test]
    fn test_absent_group_defaults_to_essentials() {
        let json = r#"{
            "description": "groceries",
            "amount": "120.00",
            "category": "food"
        }"#;
        let payload: ExpenseRequest = serde_json::from_str(json).unwrap();
        let input = expense_input(payload).unwrap();
        assert_eq!(input.group, ExpenseGroup::Essentials);
    }
}
