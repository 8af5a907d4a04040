//! Label schemas and the normalized keys that identify one series.
//!
//! Every metric family declares its label names once; observation calls may
//! pass `(name, value)` pairs in any order and are normalized here to the
//! declared order. The normalized value vector is the map key for a series,
//! so two observations with the same values always land on the same instance.

use crate::error::{PulsegateError, Result};

/// Normalized label values in schema order. Map key for one series.
pub type LabelKey = Box<[String]>;

/// The ordered label names declared for a metric family.
///
/// Fixed at registration time; every observation against the family must
/// supply exactly this set of names.
#[derive(Debug, Clone)]
pub struct LabelSchema {
    names: Vec<String>,
}

impl LabelSchema {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Declared label names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Normalize caller-supplied pairs into the declared order.
    ///
    /// Order-independent at the call site. Fails with `LabelSchemaMismatch`
    /// when the supplied name set differs from the schema (wrong arity,
    /// unknown name, missing name, or a duplicated name).
    pub fn project(&self, labels: &[(&str, &str)]) -> Result<LabelKey> {
        if labels.len() != self.names.len() {
            return Err(PulsegateError::LabelSchemaMismatch(format!(
                "expected {} label(s) {:?}, got {}",
                self.names.len(),
                self.names,
                labels.len()
            )));
        }

        let mut values: Vec<Option<String>> = vec![None; self.names.len()];
        for (name, value) in labels {
            let idx = self
                .names
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| {
                    PulsegateError::LabelSchemaMismatch(format!(
                        "unknown label {name:?}, expected {:?}",
                        self.names
                    ))
                })?;
            if values[idx].is_some() {
                return Err(PulsegateError::LabelSchemaMismatch(format!(
                    "label {name:?} supplied twice"
                )));
            }
            values[idx] = Some(value.to_string());
        }

        // Arity matched and no duplicates, so every slot is filled.
        Ok(values.into_iter().flatten().collect())
    }
}
