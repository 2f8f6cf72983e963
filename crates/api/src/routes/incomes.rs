//! Income management routes.

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

use crate::routes::expenses::ListQuery;
use crate::{AppState, middleware::AuthUser, routes::app_error_response};
use fintrack_core::events::{ChangeEvent, DataDomain};
use fintrack_db::repositories::expense::ExpenseFilter;
use fintrack_db::repositories::income::{CreateIncomeInput, IncomeError, IncomeRepository};
use fintrack_shared::AppError;

/// Creates the income routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/incomes", get(list_incomes))
        .route("/incomes", post(create_income))
        .route("/incomes/{income_id}", put(update_income))
        .route("/incomes/{income_id}", delete(delete_income))
}

/// Request body for creating or updating an income.
#[derive(Debug, Deserialize)]
pub struct IncomeRequest {
    /// Where the money came from.
    pub description: String,
    /// Amount received.
    pub amount: Decimal,
    /// Income date, `YYYY-MM-DD`; defaults to today.
    pub date: Option<String>,
    /// Credited account; defaults to the default wallet.
    pub account_id: Option<Uuid>,
}

/// GET `/incomes` - List incomes, newest first.
async fn list_incomes(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let repo = IncomeRepository::new((*state.db).clone());
    let filter = ExpenseFilter {
        month: query.month,
        year: query.year,
    };

    match repo.list_incomes(auth.user_id(), filter).await {
        Ok(incomes) => (StatusCode::OK, Json(json!({ "incomes": incomes }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list incomes");
            map_income_error(&e)
        }
    }
}

/// POST `/incomes` - Record an income and credit its account.
async fn create_income(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<IncomeRequest>,
) -> impl IntoResponse {
    let input = match income_input(payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let repo = IncomeRepository::new((*state.db).clone());

    match repo.create_income(auth.user_id(), input).await {
        Ok(income) => {
            info!(income_id = %income.id, amount = %income.amount, "Income created");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Incomes,
            });

            (StatusCode::CREATED, Json(income)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create income");
            map_income_error(&e)
        }
    }
}

/// PUT `/incomes/{income_id}` - Rewrite an income.
async fn update_income(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(income_id): Path<Uuid>,
    Json(payload): Json<IncomeRequest>,
) -> impl IntoResponse {
    let input = match income_input(payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let repo = IncomeRepository::new((*state.db).clone());

    match repo.update_income(auth.user_id(), income_id, input).await {
        Ok(income) => {
            info!(income_id = %income_id, "Income updated");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Incomes,
            });

            (StatusCode::OK, Json(income)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update income");
            map_income_error(&e)
        }
    }
}

/// DELETE `/incomes/{income_id}` - Delete an income and debit back its
/// account.
async fn delete_income(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(income_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = IncomeRepository::new((*state.db).clone());

    match repo.delete_income(auth.user_id(), income_id).await {
        Ok(()) => {
            info!(income_id = %income_id, "Income deleted");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Incomes,
            });
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete income");
            map_income_error(&e)
        }
    }
}

/// Converts the request payload into repository input.
fn income_input(payload: IncomeRequest) -> Result<CreateIncomeInput, axum::response::Response> {
    let date = crate::routes::parse_optional_date(payload.date.as_deref())?;

    Ok(CreateIncomeInput {
        description: payload.description,
        amount: payload.amount,
        date,
        account_id: payload.account_id,
    })
}

/// Maps income errors to HTTP responses.
fn map_income_error(e: &IncomeError) -> axum::response::Response {
    let app_error = match e {
        IncomeError::NotFound(id) => AppError::NotFound(format!("Income not found: {id}")),
        IncomeError::Account(_) | IncomeError::Database(_) => {
            AppError::Internal("An error occurred".to_string())
        }
    };
    app_error_response(&app_error)
}
