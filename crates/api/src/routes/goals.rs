//! Savings goal routes.

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
use fintrack_core::goal::progress_percent;
use fintrack_db::entities::goals;
use fintrack_db::repositories::goal::{CreateGoalInput, GoalError, GoalRepository};
use fintrack_shared::AppError;

/// Creates the goal routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(list_goals))
        .route("/goals", post(create_goal))
        .route("/goals/{goal_id}", put(update_goal))
        .route("/goals/{goal_id}", delete(delete_goal))
        .route("/goals/{goal_id}/add-money", post(add_money))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating or updating a goal.
#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    /// Goal name.
    pub name: String,
    /// Amount to save.
    pub target_amount: Decimal,
    /// Amount already saved.
    #[serde(default)]
    pub current_amount: Decimal,
    /// Optional target date, `YYYY-MM-DD`.
    pub deadline: Option<String>,
}

/// Request body for adding money to a goal.
#[derive(Debug, Deserialize)]
pub struct AddMoneyRequest {
    /// Amount to add.
    pub amount: Decimal,
    /// Account the money is taken from.
    pub account_id: Uuid,
}

/// Response for a goal, with computed progress.
#[derive(Debug, Serialize)]
pub struct GoalResponse {
    /// Goal ID.
    pub id: Uuid,
    /// Goal name.
    pub name: String,
    /// Amount to save.
    pub target_amount: Decimal,
    /// Amount saved so far.
    pub current_amount: Decimal,
    /// Optional target date.
    pub deadline: Option<chrono::NaiveDate>,
    /// Percent of the target saved, clamped to 100.
    pub progress: Decimal,
    /// Set when the target was reached.
    pub completed_at: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<goals::Model> for GoalResponse {
    fn from(goal: goals::Model) -> Self {
        Self {
            id: goal.id,
            name: goal.name,
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            deadline: goal.deadline,
            progress: progress_percent(goal.current_amount, goal.target_amount),
            completed_at: goal.completed_at.map(|t| t.to_rfc3339()),
            created_at: goal.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/goals` - List goals, in-progress first.
async fn list_goals(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = GoalRepository::new((*state.db).clone());

    match repo.list_goals(auth.user_id()).await {
        Ok(goals) => {
            let response: Vec<GoalResponse> = goals.into_iter().map(GoalResponse::from).collect();
            (StatusCode::OK, Json(json!({ "goals": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list goals");
            map_goal_error(&e)
        }
    }
}

/// POST `/goals` - Create a goal.
async fn create_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<GoalRequest>,
) -> impl IntoResponse {
    let input = match goal_input(payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let repo = GoalRepository::new((*state.db).clone());

    match repo.create_goal(auth.user_id(), input).await {
        Ok(goal) => {
            info!(goal_id = %goal.id, "Goal created");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Goals,
            });

            (StatusCode::CREATED, Json(GoalResponse::from(goal))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create goal");
            map_goal_error(&e)
        }
    }
}

/// PUT `/goals/{goal_id}` - Rewrite a goal, marking completion when the
/// target is reached.
async fn update_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(goal_id): Path<Uuid>,
    Json(payload): Json<GoalRequest>,
) -> impl IntoResponse {
    let input = match goal_input(payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let repo = GoalRepository::new((*state.db).clone());

    match repo.update_goal(auth.user_id(), goal_id, input).await {
        Ok(goal) => {
            info!(goal_id = %goal_id, "Goal updated");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Goals,
            });

            (StatusCode::OK, Json(GoalResponse::from(goal))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update goal");
            map_goal_error(&e)
        }
    }
}

/// POST `/goals/{goal_id}/add-money` - Credit the goal and debit an account.
async fn add_money(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(goal_id): Path<Uuid>,
    Json(payload): Json<AddMoneyRequest>,
) -> impl IntoResponse {
    let repo = GoalRepository::new((*state.db).clone());

    match repo
        .add_money(auth.user_id(), goal_id, payload.amount, payload.account_id)
        .await
    {
        Ok(goal) => {
            info!(goal_id = %goal_id, amount = %payload.amount, "Money added to goal");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Goals,
            });
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Accounts,
            });

            (StatusCode::OK, Json(GoalResponse::from(goal))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to add money to goal");
            map_goal_error(&e)
        }
    }
}

/// DELETE `/goals/{goal_id}` - Delete a goal.
async fn delete_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(goal_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = GoalRepository::new((*state.db).clone());

    match repo.delete_goal(auth.user_id(), goal_id).await {
        Ok(()) => {
            info!(goal_id = %goal_id, "Goal deleted");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Goals,
            });
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete goal");
            map_goal_error(&e)
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Converts the request payload into repository input.
fn goal_input(payload: GoalRequest) -> Result<CreateGoalInput, axum::response::Response> {
    let deadline = crate::routes::parse_optional_date(payload.deadline.as_deref())?;

    Ok(CreateGoalInput {
        name: payload.name,
        target_amount: payload.target_amount,
        current_amount: payload.current_amount,
        deadline,
    })
}

/// Maps goal errors to HTTP responses.
fn map_goal_error(e: &GoalError) -> axum::response::Response {
    let app_error = match e {
        GoalError::NotFound(id) => AppError::NotFound(format!("Goal not found: {id}")),
        GoalError::Database(_) => AppError::Internal("An error occurred".to_string()),
    };
    app_error_response(&app_error)
}
