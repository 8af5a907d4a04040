//! Cumulative histograms keyed by label values.
//!
//! Bucket bounds are caller-supplied at registration (validated strictly
//! increasing and finite) and shared by every series of the family. Each
//! series keeps its buckets, sum, and count behind one narrow mutex so an
//! observation lands as a unit and a scrape never reads a torn triple.
//! Different series never contend with each other.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use dashmap::DashMap;

use crate::error::{PulsegateError, Result};
use crate::label::{LabelKey, LabelSchema};

/// Validate a bucket spec: non-empty, finite, strictly increasing.
pub(crate) fn validate_buckets(bounds: &[f64]) -> Result<()> {
    if bounds.is_empty() {
        return Err(PulsegateError::BadBucketSpec("no buckets declared".into()));
    }
    for w in bounds.windows(2) {
        if !(w[0] < w[1]) {
            return Err(PulsegateError::BadBucketSpec(format!(
                "bounds must be strictly increasing, got {} then {}",
                w[0], w[1]
            )));
        }
    }
    if let Some(b) = bounds.iter().find(|b| !b.is_finite()) {
        return Err(PulsegateError::BadBucketSpec(format!(
            "bound {b} is not finite"
        )));
    }
    Ok(())
}

#[derive(Debug, Default)]
struct HistogramCell {
    buckets: Vec<u64>,
    sum: f64,
    count: u64,
}

/// A consistent read of one histogram series.
#[derive(Debug, Clone)]
pub struct HistogramSnapshot {
    /// Cumulative count per declared bound.
    pub buckets: Vec<u64>,
    pub sum: f64,
    pub count: u64,
}

/// One histogram series: cumulative bucket counts plus sum and total count.
#[derive(Debug)]
pub struct Histogram {
    bounds: Arc<[f64]>,
    cell: Mutex<HistogramCell>,
}

impl Histogram {
    fn new(bounds: Arc<[f64]>) -> Self {
        let buckets = vec![0; bounds.len()];
        Self {
            bounds,
            cell: Mutex::new(HistogramCell {
                buckets,
                sum: 0.0,
                count: 0,
            }),
        }
    }

    /// Declared upper bounds, ascending.
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Record one value: every bucket whose bound >= value is incremented,
    /// the count by 1, and the sum by the value, as one atomic step.
    pub fn observe(&self, value: f64) {
        let Ok(mut cell) = self.cell.lock() else {
            // A poisoned lock means an earlier caller panicked mid-update;
            // drop the observation rather than poison the scrape path.
            tracing::warn!(value, "histogram cell poisoned, observation dropped");
            return;
        };
        for (i, bound) in self.bounds.iter().enumerate() {
            if value <= *bound {
                cell.buckets[i] += 1;
            }
        }
        cell.count += 1;
        cell.sum += value;
    }

    /// Read buckets, sum, and count as one consistent triple.
    pub fn snapshot(&self) -> HistogramSnapshot {
        match self.cell.lock() {
            Ok(cell) => HistogramSnapshot {
                buckets: cell.buckets.clone(),
                sum: cell.sum,
                count: cell.count,
            },
            Err(_) => HistogramSnapshot {
                buckets: vec![0; self.bounds.len()],
                sum: 0.0,
                count: 0,
            },
        }
    }
}

/// A started duration measurement against one histogram series.
///
/// Holds the start instant and the target series; `observe_duration`
/// consumes it, so a timer can fire at most once. A dropped timer simply
/// never observes.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    series: Arc<Histogram>,
}

impl Timer {
    /// Observe elapsed seconds on the target series. Returns the elapsed
    /// value for callers that want to log it.
    pub fn observe_duration(self) -> f64 {
        let elapsed = self.start.elapsed().as_secs_f64();
        self.series.observe(elapsed);
        elapsed
    }
}

/// A histogram family: label values -> histogram series, created on first use.
#[derive(Debug)]
pub struct HistogramVec {
    schema: LabelSchema,
    bounds: Arc<[f64]>,
    cells: DashMap<LabelKey, Arc<Histogram>>,
}

impl HistogramVec {
    pub fn new(schema: LabelSchema, bounds: &[f64]) -> Result<Self> {
        validate_buckets(bounds)?;
        Ok(Self {
            schema,
            bounds: bounds.into(),
            cells: DashMap::new(),
        })
    }

    pub fn schema(&self) -> &LabelSchema {
        &self.schema
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Look up or create the series for this label combination.
    pub fn get_or_create(&self, labels: &[(&str, &str)]) -> Result<Arc<Histogram>> {
        let key = self.schema.project(labels)?;
        let cell = self
            .cells
            .entry(key)
            .or_insert_with(|| Arc::new(Histogram::new(Arc::clone(&self.bounds))));
        Ok(Arc::clone(cell.value()))
    }

    /// Convenience: `get_or_create` + `observe`.
    pub fn observe(&self, labels: &[(&str, &str)], value: f64) -> Result<()> {
        self.get_or_create(labels)?.observe(value);
        Ok(())
    }

    /// Capture the current instant against this label combination.
    pub fn start_timer(&self, labels: &[(&str, &str)]) -> Result<Timer> {
        Ok(Timer {
            start: Instant::now(),
            series: self.get_or_create(labels)?,
        })
    }

    /// Snapshot all series as (label key, triple), sorted by label values.
    pub fn series(&self) -> Vec<(LabelKey, HistogramSnapshot)> {
        let mut out: Vec<_> = self
            .cells
            .iter()
            .map(|r| (r.key().clone(), r.value().snapshot()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}
