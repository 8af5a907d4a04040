//! Up/down gauges keyed by label values.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::Result;
use crate::label::{LabelKey, LabelSchema};

/// One gauge series. Arbitrary sign, starts at 0.
#[derive(Debug)]
pub struct Gauge {
    bits: AtomicU64,
}

impl Gauge {
    fn new() -> Self {
        Self {
            bits: AtomicU64::new(0f64.to_bits()),
        }
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.add(1.0);
    }

    /// Decrement by 1.
    pub fn dec(&self) {
        self.add(-1.0);
    }

    /// Add a signed delta.
    pub fn add(&self, delta: f64) {
        let mut cur = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(cur) + delta).to_bits();
            match self
                .bits
                .compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(actual) => cur = actual,
            }
        }
    }

    /// Subtract a signed delta.
    pub fn sub(&self, delta: f64) {
        self.add(-delta);
    }

    /// Overwrite the current value.
    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

/// A gauge family: label values -> gauge series, created on first use.
#[derive(Debug)]
pub struct GaugeVec {
    schema: LabelSchema,
    cells: DashMap<LabelKey, Arc<Gauge>>,
}

impl GaugeVec {
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
    pub fn get_or_create(&self, labels: &[(&str, &str)]) -> Result<Arc<Gauge>> {
        let key = self.schema.project(labels)?;
        let cell = self
            .cells
            .entry(key)
            .or_insert_with(|| Arc::new(Gauge::new()));
        Ok(Arc::clone(cell.value()))
    }

    pub fn inc(&self, labels: &[(&str, &str)]) -> Result<()> {
        self.get_or_create(labels)?.inc();
        Ok(())
    }

    pub fn dec(&self, labels: &[(&str, &str)]) -> Result<()> {
        self.get_or_create(labels)?.dec();
        Ok(())
    }

    pub fn set(&self, labels: &[(&str, &str)], value: f64) -> Result<()> {
        self.get_or_create(labels)?.set(value);
        Ok(())
    }

    /// Snapshot all series as (label key, value), sorted by label values.
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
