//! Budget split preference routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, routes::app_error_response};
use fintrack_core::allocation::{AllocationService, BudgetSplit};
use fintrack_core::events::{ChangeEvent, DataDomain};
use fintrack_db::repositories::preferences::PreferencesRepository;
use fintrack_shared::AppError;

/// Creates the preferences routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/preferences", get(get_preferences))
        .route("/preferences", put(update_preferences))
}

/// GET `/preferences` - The user's budget split, or the 50/30/20 default.
///
/// Never 404s: users without a saved split get the default.
async fn get_preferences(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = PreferencesRepository::new((*state.db).clone());

    match repo.split_or_default(auth.user_id()).await {
        Ok(split) => (StatusCode::OK, Json(split)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load preferences");
            app_error_response(&AppError::Internal("An error occurred".to_string()))
        }
    }
}

/// PUT `/preferences` - Save the budget split.
///
/// The split is validated before anything is written: the three percentages
/// must be non-negative and total 100 within a tolerance of 0.01.
async fn update_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(split): Json<BudgetSplit>,
) -> impl IntoResponse {
    if let Err(e) = AllocationService::validate_split(&split) {
        return app_error_response(&AppError::Validation(e.to_string()));
    }

    let repo = PreferencesRepository::new((*state.db).clone());

    match repo.save_split(auth.user_id(), &split).await {
        Ok(()) => {
            info!(user_id = %auth.user_id(), "Preferences updated");
            state.changes.publish(ChangeEvent {
                user_id: auth.user_id(),
                domain: DataDomain::Preferences,
            });

            (
                StatusCode::OK,
                Json(json!({
                    "message": "Preferences updated",
                    "expenses_percent": split.essentials_percent,
                    "entertainment_percent": split.leisure_percent,
                    "investment_percent": split.investment_percent
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to save preferences");
            app_error_response(&AppError::Internal("An error occurred".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use fintrack_core::allocation::BudgetSplit;
    use rust_decimal_macros::dec;

    #[test]
    fn test_split_payload_field_names() {
        let json = r#"{
            "expenses_percent": "55",
            "entertainment_percent": "25",
            "investment_percent": "20"
        }"#;
        let split: BudgetSplit = serde_json::from_str(json).unwrap();
        assert_eq!(split.essentials_percent, dec!(55));
        assert_eq!(split.leisure_percent, dec!(25));
        assert_eq!(split.investment_percent, dec!(20));
    }
}
