//! pulseGate gateway binary.
//!
//! Loads the strict YAML config, declares the metric families, and serves
//! the instrumented routes plus the `/metrics` scrape endpoint.

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use pulsegate_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // Configuration failures are fatal: refuse to serve traffic.
    let cfg = match config::load_from_file("pulsegate.yaml") {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::error!(%err, "config load failed");
            return ExitCode::FAILURE;
        }
    };
    let listen: SocketAddr = match cfg.gateway.listen.parse() {
        Ok(addr) => addr,
        Err(err) => {
            tracing::error!(%err, "gateway.listen must be a valid SocketAddr");
            return ExitCode::FAILURE;
        }
    };

    let state = match app_state::AppState::new(cfg) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(%err, "metric family registration failed");
            return ExitCode::FAILURE;
        }
    };
    let app = router::build_router(state);

    tracing::info!(%listen, "pulsegate-gateway starting");
    let listener = match tokio::net::TcpListener::bind(listen).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%err, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(%err, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
