//! pulseGate core: process-local metric state and the text exposition surface.
//!
//! This crate defines label schemas, the three metric kinds (counter, gauge,
//! histogram), the keyed vectors that hold their per-series instances, and the
//! registry that renders everything in Prometheus text format. It intentionally
//! carries no transport or runtime dependencies so it can be embedded in any
//! server stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `PulsegateError`/`Result` so an
//! instrumented process never crashes on a bad observation call.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod error;
pub mod gauge;
pub mod histogram;
pub mod label;
pub mod registry;
pub mod render;

/// Shared result type.
pub use error::{PulsegateError, Result};

pub use counter::{Counter, CounterVec};
pub use gauge::{Gauge, GaugeVec};
pub use histogram::{Histogram, HistogramSnapshot, HistogramVec, Timer};
pub use label::LabelSchema;
pub use registry::Registry;
pub use render::CONTENT_TYPE;
