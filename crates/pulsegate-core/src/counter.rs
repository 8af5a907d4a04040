//! Monotonic counters keyed by label values.
//!
//! Counter state is an f64 stored as bits in an `AtomicU64` and updated with
//! a CAS loop, so concurrent increments on the same series never clobber each
//! other and a scrape never sees a torn value.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{PulsegateError, Result};
use crate::label::{LabelKey, LabelSchema};

/// One counter series. Monotonically non-decreasing, starts at 0.
///
/// No reset is exposed; consumers rely on monotonicity for rate computation.
#[derive(Debug)]
pub struct Counter {
    bits: AtomicU64,
}

impl Counter {
    fn new() -> Self {
        Self {
            bits: AtomicU64::new(0f64.to_bits()),
        }
    }

    /// Increment by 1.
    pub fn inc(&self) {
        // 1.0 is always a valid amount.
        let _ = self.add(1.0);
    }

    /// Increment by an arbitrary non-negative finite amount.
    pub fn add(&self, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(PulsegateError::InvalidAmount(amount));
        }
        let mut cur = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(cur) + amount).to_bits();
            match self
                .bits
                .compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return Ok(()),
                Err(actual) => cur = actual,
            }
        }
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

/// A counter family: label values -> counter series, created on first use.
#[derive(Debug)]
pub struct CounterVec {
    schema: LabelSchema,
    cells: DashMap<LabelKey, Arc<Counter>>,
}

impl CounterVec {
    pub fn new(schema: LabelSchema) -> Self {
        Self {
            schema,
            cells: DashMap::new(),
        }
    }

    pub fn schema(&self) -> &LabelSchema {
        &self.schema
    }

    /// Look up or create the series for this label combination.
    ///
    /// Safe under concurrent first use: the entry API guarantees at most one
    /// series is ever created per label key. The mapping only grows.
    pub fn get_or_create(&self, labels: &[(&str, &str)]) -> Result<Arc<Counter>> {
        let key = self.schema.project(labels)?;
        let cell = self
            .cells
            .entry(key)
            .or_insert_with(|| Arc::new(Counter::new()));
        Ok(Arc::clone(cell.value()))
    }

    /// Convenience: `get_or_create` + `inc`.
    pub fn inc(&self, labels: &[(&str, &str)]) -> Result<()> {
        self.get_or_create(labels)?.inc();
        Ok(())
    }

    /// Convenience: `get_or_create` + `add`.
    pub fn add(&self, labels: &[(&str, &str)], amount: f64) -> Result<()> {
        self.get_or_create(labels)?.add(amount)
    }

    /// Snapshot all series as (label key, value), sorted by label values so
    /// consecutive renders of unchanged state are byte-identical.
    pub fn series(&self) -> Vec<(LabelKey, f64)> {
        let mut out: Vec<_> = self
            .cells
            .iter()
            .map(|r| (r.key().clone(), r.value().get()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}
