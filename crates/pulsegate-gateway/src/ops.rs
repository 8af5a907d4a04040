//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format
//!
//! Both are mounted outside the instrumentation layer so a scrape does not
//! count itself.

use axum::{http::StatusCode, response::{IntoResponse, Response}};

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Scrape endpoint: render the registry, no side effects.
pub async fn metrics(axum::extract::State(state): axum::extract::State<AppState>) -> Response {
    let body = state.registry().render();

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, pulsegate_core::CONTENT_TYPE)],
        body,
    )
        .into_response()
}
