//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, middleware::auth::auth_middleware};
use fintrack_shared::AppError;

pub mod accounts;
pub mod auth;
pub mod events;
pub mod expenses;
pub mod goals;
pub mod health;
pub mod incomes;
pub mod preferences;
pub mod summary;

/// Creates the API router with public and protected routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(accounts::routes())
        .merge(expenses::routes())
        .merge(incomes::routes())
        .merge(goals::routes())
        .merge(preferences::routes())
        .merge(summary::routes())
        .merge(events::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Renders an [`AppError`] as a JSON error response.
pub(crate) fn app_error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code().to_lowercase(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Generic 500 response that does not leak internals.
pub(crate) fn internal_error() -> Response {
    app_error_response(&AppError::Internal("An error occurred".to_string()))
}

/// 400 response for an unparseable `YYYY-MM-DD` date.
pub(crate) fn invalid_date() -> Response {
    app_error_response(&AppError::Validation(
        "Invalid date, use YYYY-MM-DD".to_string(),
    ))
}

/// Parses an optional `YYYY-MM-DD` date string.
pub(crate) fn parse_optional_date(
    value: Option<&str>,
) -> Result<Option<chrono::NaiveDate>, Response> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| invalid_date()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
        assert_eq!(
            parse_optional_date(Some("2026-08-02")).unwrap(),
            Some(chrono::NaiveDate::from_ymd_opt(2026, 8, 2).unwrap())
        );
        assert!(parse_optional_date(Some("02/08/2026")).is_err());
    }
}
