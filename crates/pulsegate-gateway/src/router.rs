//! Axum router wiring.
//!
//! Business routes sit under the instrumentation layer; `/metrics` and
//! `/healthz` are added after it so scrapes and probes are not counted.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, handlers, instrument, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/user/login", post(handlers::login))
        .route("/example", get(handlers::example))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            instrument::track_http,
        ))
        .route("/metrics", get(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .with_state(state)
}
