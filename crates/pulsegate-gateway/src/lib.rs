//! pulseGate gateway library entry.
//!
//! This crate wires the metrics core into an axum HTTP stack: a per-request
//! instrumentation layer, the `/metrics` scrape endpoint, demo business
//! routes, and strict YAML configuration. It is intended to be consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod handlers;
pub mod instrument;
pub mod ops;
pub mod router;
