//! Authentication routes for signup and login.

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{ConnectInfo, State},
    http::{StatusCode, header::RETRY_AFTER},
    response::IntoResponse,
    routing::post,
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::AppState;
use fintrack_core::auth::{hash_password, verify_password};
use fintrack_db::repositories::user::{CreateUserInput, UserError, UserRepository};
use fintrack_shared::auth::{LoginRequest, LoginResponse, SignupRequest};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

/// POST /auth/signup - Register a new user.
async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> impl IntoResponse {
    if payload.email.trim().is_empty()
        || payload.password.is_empty()
        || payload.first_name.trim().is_empty()
        || payload.last_name.trim().is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "missing_fields",
                "message": "Email, password, and name are all required"
            })),
        )
            .into_response();
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return crate::routes::internal_error();
        }
    };

    let user_repo = UserRepository::new((*state.db).clone());
    let input = CreateUserInput {
        email: payload.email.trim().to_string(),
        password_hash,
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
    };

    match user_repo.create_user(input).await {
        Ok(user) => {
            info!(user_id = %user.id, "User registered");
            (
                StatusCode::CREATED,
                Json(json!({
                    "id": user.id,
                    "email": user.email,
                    "first_name": user.first_name,
                    "last_name": user.last_name
                })),
            )
                .into_response()
        }
        Err(UserError::DuplicateEmail(_)) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "email_taken",
                "message": "This email is already registered"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create user");
            crate::routes::internal_error()
        }
    }
}

/// POST /auth/login - Authenticate and return a token.
///
/// Rate limited per client IP to slow brute-force attempts.
async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let client_ip = addr.ip().to_string();
    if !state.login_limiter.check(&client_ip) {
        warn!(client_ip = %client_ip, "Login rate limit hit");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [(
                RETRY_AFTER,
                state.login_limiter.retry_after_secs().to_string(),
            )],
            Json(json!({
                "error": "too_many_attempts",
                "message": "Too many login attempts, try again later"
            })),
        )
            .into_response();
    }

    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for non-existent user");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return crate::routes::internal_error();
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return crate::routes::internal_error();
        }
    }

    let token = match state.jwt_service.generate_token(user.id) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "Failed to generate token");
            return crate::routes::internal_error();
        }
    };

    info!(user_id = %user.id, "User logged in");
    Json(LoginResponse {
        token,
        expires_in: state.jwt_service.token_expires_in(),
        first_name: user.first_name,
        last_name: user.last_name,
    })
    .into_response()
}

/// 401 for both unknown email and bad password, leaking neither.
fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid email or password"
        })),
    )
        .into_response()
}
