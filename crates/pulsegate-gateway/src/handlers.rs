//! Demo business routes.
//!
//! Thin handlers that exercise the instrumentation stack. The login route
//! moves the active-user gauge as domain logic layered on top of the core.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::app_state::AppState;

/// `POST /user/login`: a successful login raises the active-user count.
pub async fn login(State(state): State<AppState>) -> impl IntoResponse {
    match state.http_metrics().active_users() {
        Ok(gauge) => gauge.inc(),
        // Best-effort: the login still succeeds if the gauge is unusable.
        Err(err) => tracing::warn!(%err, "active_users gauge update dropped"),
    }
    Json(json!({ "status": "logged in" }))
}

/// `GET /example`: plain instrumented route.
pub async fn example() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
