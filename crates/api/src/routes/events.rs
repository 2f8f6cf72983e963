//! Change notification endpoint.
//!
//! Long-poll replacement for the old client-side refresh counter: after a
//! mutation commits, dependent clients learn which domain went stale and
//! re-run only those queries.

use std::time::Duration;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use crate::{AppState, middleware::AuthUser};

/// How long a poll waits for an event before returning empty.
const POLL_TIMEOUT: Duration = Duration::from_secs(25);

/// Creates the events routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/events", get(poll_events))
}

/// GET `/events` - Long-poll for the next change event owned by the caller.
///
/// Returns the event as JSON, or 204 when nothing changed within the poll
/// window. Lagged subscribers skip missed events and keep listening.
async fn poll_events(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let mut receiver = state.changes.subscribe();
    let deadline = tokio::time::Instant::now() + POLL_TIMEOUT;

    loop {
        let event = tokio::time::timeout_at(deadline, receiver.recv()).await;
        match event {
            Ok(Ok(event)) if event.user_id == auth.user_id() => {
                return (StatusCode::OK, Json(event)).into_response();
            }
            // Someone else's data changed; keep waiting.
            Ok(Ok(_)) => {}
            Ok(Err(RecvError::Lagged(missed))) => {
                debug!(missed, "Event subscriber lagged");
            }
            Ok(Err(RecvError::Closed)) | Err(_) => {
                return StatusCode::NO_CONTENT.into_response();
            }
        }
    }
}
