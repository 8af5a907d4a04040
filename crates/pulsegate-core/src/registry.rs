//! The process-wide family registry.
//!
//! An explicit object rather than a module-level singleton: construct one at
//! startup, share it by `Arc`, and build isolated registries freely in tests.
//! Families are registered once at startup and kept in registration order so
//! the exposition output is stable across renders.

use std::sync::{Arc, RwLock};

use crate::counter::CounterVec;
use crate::error::{PulsegateError, Result};
use crate::gauge::GaugeVec;
use crate::histogram::HistogramVec;
use crate::label::LabelSchema;
use crate::render;

pub(crate) enum VectorHandle {
    Counter(Arc<CounterVec>),
    Gauge(Arc<GaugeVec>),
    Histogram(Arc<HistogramVec>),
}

pub(crate) struct Family {
    pub(crate) name: String,
    pub(crate) help: String,
    pub(crate) vec: VectorHandle,
}

/// Owns every registered metric family and renders the exposition snapshot.
#[derive(Default)]
pub struct Registry {
    // Write-locked only during startup registration; renders take the read
    // side, so observation updates never wait on an export.
    families: RwLock<Vec<Family>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, name: &str, help: &str, vec: VectorHandle) -> Result<()> {
        let Ok(mut families) = self.families.write() else {
            return Err(PulsegateError::Config("registry lock poisoned".into()));
        };
        if families.iter().any(|f| f.name == name) {
            return Err(PulsegateError::DuplicateName(name.to_string()));
        }
        families.push(Family {
            name: name.to_string(),
            help: help.to_string(),
            vec,
        });
        Ok(())
    }

    /// Register a counter family. Fails with `DuplicateName` if the name is
    /// taken by any kind; the existing family is left untouched.
    pub fn register_counter(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<Arc<CounterVec>> {
        let vec = Arc::new(CounterVec::new(LabelSchema::new(label_names)));
        self.insert(name, help, VectorHandle::Counter(Arc::clone(&vec)))?;
        Ok(vec)
    }

    /// Register a gauge family.
    pub fn register_gauge(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<Arc<GaugeVec>> {
        let vec = Arc::new(GaugeVec::new(LabelSchema::new(label_names)));
        self.insert(name, help, VectorHandle::Gauge(Arc::clone(&vec)))?;
        Ok(vec)
    }

    /// Register a histogram family. The bucket spec is validated here;
    /// a bad spec is fatal at startup.
    pub fn register_histogram(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
        buckets: &[f64],
    ) -> Result<Arc<HistogramVec>> {
        let vec = Arc::new(HistogramVec::new(LabelSchema::new(label_names), buckets)?);
        self.insert(name, help, VectorHandle::Histogram(Arc::clone(&vec)))?;
        Ok(vec)
    }

    /// Render every family in Prometheus text exposition format.
    ///
    /// Families appear in registration order and series within a family are
    /// sorted by label values, so unchanged state renders byte-identically.
    /// Holds only the registry read lock for the family list; per-series
    /// reads are independent, so concurrent observations may land between
    /// families (eventual consistency, standard scrape semantics).
    pub fn render(&self) -> String {
        let mut out = String::new();
        let Ok(families) = self.families.read() else {
            return out;
        };
        for family in families.iter() {
            render::write_family(&mut out, family);
        }
        out
    }
}
