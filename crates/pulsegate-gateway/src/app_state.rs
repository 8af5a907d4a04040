//! Shared application state for the pulseGate gateway.
//!
//! The registry is an explicit object owned here, not a global: tests build
//! isolated states freely, and everything that records or renders metrics
//! reaches them through this handle.

use std::sync::Arc;

use pulsegate_core::{Registry, Result};

use crate::config::GatewayConfig;
use crate::instrument::HttpMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    registry: Registry,
    http: HttpMetrics,
}

impl AppState {
    /// Build application state: construct the registry and declare every
    /// metric family. Returns Result so main can refuse to serve traffic on
    /// a duplicate name or bad bucket spec instead of panicking.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let registry = Registry::new();
        let http = HttpMetrics::register(&registry, &cfg.metrics.duration_buckets)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                http,
            }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn http_metrics(&self) -> &HttpMetrics {
        &self.inner.http
    }
}
