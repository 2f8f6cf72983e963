//! Account management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::app_error_response};
use fintrack_core::events::{ChangeEvent, DataDomain};
use fintrack_db::entities::sea_orm_active_enums::AccountType;
use fintrack_db::repositories::account::{
    AccountError, AccountRepository, AccountWithBalance, CreateAccountInput, TransferInput,
    UpdateAccountInput,
};
use fintrack_shared::AppError;

/// Creates the account routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts", post(create_account))
        .route("/accounts/{account_id}", put(update_account))
        .route("/accounts/{account_id}", delete(delete_account))
        .route("/accounts/transfer", post(transfer_funds))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating or updating an account.
#[derive(Debug, Deserialize)]
pub struct AccountRequest {
    /// Display name.
    pub name: String,
    /// Account kind.
    pub account_type: AccountType,
    /// Opening balance.
    #[serde(default)]
    pub opening_balance: Decimal,
    /// Balance fallback for clients that predate opening balances.
    #[serde(default)]
    pub balance: Decimal,
}

/// Request body for a transfer.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Origin account.
    pub from_account_id: Uuid,
    /// Destination account.
    pub to_account_id: Uuid,
    /// Amount to move.
    pub amount: Decimal,
    /// Optional note.
    pub description: Option<String>,
    /// Transfer date, `YYYY-MM-DD`.
    pub date: Option<String>,
}

/// Response for an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Account kind.
    pub account_type: AccountType,
    /// Balance derived from transaction history.
    pub balance: Decimal,
    /// Opening balance.
    pub opening_balance: Decimal,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<AccountWithBalance> for AccountResponse {
    fn from(item: AccountWithBalance) -> Self {
        Self {
            id: item.account.id,
            name: item.account.name,
            account_type: item.account.account_type,
            balance: item.balance,
            opening_balance: item.account.opening_balance,
            created_at: item.account.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/accounts` - List accounts with derived balances.
async fn list_accounts(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_with_balances(auth.user_id()).await {
        Ok(accounts) => {
            let response: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();
            (StatusCode::OK, Json(json!({ "accounts": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list accounts");
            map_account_error(&e)
        }
    }
}

/// POST `/accounts` - Create a new account.
async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<AccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    let input = CreateAccountInput {
        user_id: auth.user_id(),
        name: payload.name,
        account_type: payload.account_type,
        opening_balance: payload.opening_balance,
        balance: payload.balance,
    };

    match repo.create_account(input).await {
        Ok(account) => {
            info!(account_id = %account.id, "Account created");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Accounts,
            });

            (
                StatusCode::CREATED,
                Json(json!({
                    "id": account.id,
                    "name": account.name,
                    "account_type": account.account_type,
                    "balance": account.balance,
                    "opening_balance": account.opening_balance,
                    "created_at": account.created_at
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create account");
            map_account_error(&e)
        }
    }
}

/// PUT `/accounts/{account_id}` - Update an account.
async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<AccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    let input = UpdateAccountInput {
        name: payload.name,
        account_type: payload.account_type,
        opening_balance: payload.opening_balance,
        balance: payload.balance,
    };

    match repo.update_account(auth.user_id(), account_id, input).await {
        Ok(account) => {
            info!(account_id = %account_id, "Account updated");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Accounts,
            });

            (
                StatusCode::OK,
                Json(json!({
                    "id": account.id,
                    "name": account.name,
                    "account_type": account.account_type,
                    "balance": account.balance,
                    "opening_balance": account.opening_balance
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update account");
            map_account_error(&e)
        }
    }
}

/// DELETE `/accounts/{account_id}` - Delete an account.
///
/// The default wallet is protected and cannot be deleted.
async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.delete_account(auth.user_id(), account_id).await {
        Ok(()) => {
            info!(account_id = %account_id, "Account deleted");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Accounts,
            });
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete account");
            map_account_error(&e)
        }
    }
}

/// POST `/accounts/transfer` - Move money between two accounts.
async fn transfer_funds(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<TransferRequest>,
) -> impl IntoResponse {
    let date = match crate::routes::parse_optional_date(payload.date.as_deref()) {
        Ok(date) => date,
        Err(response) => return response,
    };

    let repo = AccountRepository::new((*state.db).clone());

    let input = TransferInput {
        user_id: auth.user_id(),
        from_account_id: payload.from_account_id,
        to_account_id: payload.to_account_id,
        amount: payload.amount,
        description: payload.description,
        date,
    };

    match repo.transfer(input).await {
        Ok(()) => {
            info!(
                from = %payload.from_account_id,
                to = %payload.to_account_id,
                "Transfer completed"
            );
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Accounts,
            });

            (
                StatusCode::OK,
                Json(json!({ "message": "Transfer completed" })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to transfer funds");
            map_account_error(&e)
        }
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Maps account errors to HTTP responses.
fn map_account_error(e: &AccountError) -> axum::response::Response {
    let app_error = match e {
        AccountError::NotFound(id) => AppError::NotFound(format!("Account not found: {id}")),
        AccountError::InvalidTransferAccounts => {
            AppError::Forbidden("Both accounts must exist and belong to you".to_string())
        }
        AccountError::ProtectedDefault => {
            AppError::Forbidden("The default wallet cannot be deleted".to_string())
        }
        AccountError::Transfer(rule) => AppError::Validation(rule.to_string()),
        AccountError::Database(_) => AppError::Internal("An error occurred".to_string()),
    };
    app_error_response(&app_error)
}
