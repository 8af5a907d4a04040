//! Per-request instrumentation.
//!
//! Declares the HTTP metric families at startup and bridges the request
//! lifecycle to them: entry starts a duration timer, completion records the
//! request counter (with the real response status) and the duration. An
//! instrumentation failure is logged and never fails the underlying request.

use std::sync::Arc;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use pulsegate_core::{CounterVec, Gauge, GaugeVec, HistogramVec, Registry, Result, Timer};

use crate::app_state::AppState;

/// The gateway's HTTP metric families, registered once at startup.
pub struct HttpMetrics {
    requests: Arc<CounterVec>,
    duration: Arc<HistogramVec>,
    active_users: Arc<GaugeVec>,
}

impl HttpMetrics {
    /// Declare the request-count, response-duration, and active-user
    /// families. Duplicate names or a bad bucket spec abort startup.
    pub fn register(registry: &Registry, duration_buckets: &[f64]) -> Result<Self> {
        let requests = registry.register_counter(
            "http_requests_total",
            "Total HTTP requests",
            &["method", "route", "status_code"],
        )?;
        let duration = registry.register_histogram(
            "http_response_duration_seconds",
            "HTTP response duration in seconds",
            &["method", "route"],
            duration_buckets,
        )?;
        let active_users =
            registry.register_gauge("active_users", "Currently active users", &[])?;
        // Prime the unlabeled gauge so it exposes 0 before the first login.
        active_users.get_or_create(&[])?;

        Ok(Self {
            requests,
            duration,
            active_users,
        })
    }

    /// Request entry: capture method/route and start the duration timer.
    ///
    /// The returned tracker must be completed exactly once when the response
    /// finishes; dropping it without completing loses the observation but
    /// harms nothing else.
    pub fn on_request(&self, method: &str, route: &str) -> InFlight {
        let timer = match self
            .duration
            .start_timer(&[("method", method), ("route", route)])
        {
            Ok(timer) => Some(timer),
            Err(err) => {
                tracing::warn!(%err, method, route, "duration timer not started");
                None
            }
        };
        InFlight {
            method: method.to_string(),
            route: route.to_string(),
            timer,
            requests: Arc::clone(&self.requests),
        }
    }

    /// The active-user gauge, for business handlers to move.
    pub fn active_users(&self) -> Result<Arc<Gauge>> {
        self.active_users.get_or_create(&[])
    }
}

/// One request being tracked between entry and response completion.
///
/// Consuming `complete` makes the completion single-fire by construction.
pub struct InFlight {
    method: String,
    route: String,
    timer: Option<Timer>,
    requests: Arc<CounterVec>,
}

impl InFlight {
    /// Response completion: count the request under its real status code and
    /// observe the elapsed duration.
    pub fn complete(self, status: u16) {
        let status = status.to_string();
        if let Err(err) = self.requests.inc(&[
            ("method", &self.method),
            ("route", &self.route),
            ("status_code", &status),
        ]) {
            tracing::warn!(%err, method = %self.method, route = %self.route, "request count dropped");
        }
        if let Some(timer) = self.timer {
            timer.observe_duration();
        }
    }
}

/// Axum middleware: tracks every request routed through it.
///
/// Uses the matched route template (not the raw URI path) as the `route`
/// label so cardinality stays bounded by the declared routes. The response
/// always comes back from `next.run`, success or error, so completion fires
/// exactly once per request.
pub async fn track_http(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().as_str().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let inflight = state.http_metrics().on_request(&method, &route);
    let res = next.run(req).await;
    inflight.complete(res.status().as_u16());
    res
}
