//! Flat feature encoder
//!
//! Aggregates an instance's variable-length code lists into one fixed-size
//! vector: the sum over every token vector of every code, unit-normalized,
//! followed by the configured demographic scalars. The layout is a contract
//! with the downstream trainer: `[0, D)` carries the code signal and
//! `[D, D + demo)` the demographic values in configured order, identical
//! between training and inference.

pub mod matrix;

pub use matrix::FeatureMatrix;

use crate::config::DemoVariable;
use crate::error::{PcReaderError, Result};
use crate::expand::{DIAGNOSIS_PREFIX, ExpandedInstance, PROCEDURE_PREFIX};
use crate::models::PatientCase;
use crate::vectors::{CodeVectorStore, unitvec};
use log::debug;
use rayon::prelude::*;

/// Encodes expanded instances into fixed-size feature rows
pub struct FlatEncoder<'a> {
    store: &'a CodeVectorStore,
    demo_variables: &'a [DemoVariable],
}

impl<'a> FlatEncoder<'a> {
    /// Create an encoder over a vector store and a demographic layout
    #[must_use]
    pub const fn new(store: &'a CodeVectorStore, demo_variables: &'a [DemoVariable]) -> Self {
        Self {
            store,
            demo_variables,
        }
    }

    /// Length of every encoded row: embedding dims + demographic slots
    #[must_use]
    pub fn feature_len(&self) -> usize {
        self.store.dims() + self.demo_variables.len()
    }

    /// Encode one instance of one case
    pub fn encode(&self, case: &PatientCase, instance: &ExpandedInstance) -> Result<Vec<f32>> {
        let mut acc = vec![0.0f32; self.store.dims()];
        self.accumulate(&mut acc, &instance.diagnoses, DIAGNOSIS_PREFIX)?;
        self.accumulate(&mut acc, &instance.procedures, PROCEDURE_PREFIX)?;

        if acc.iter().all(|v| *v == 0.0) {
            debug!("Case {}: all-zero code segment", case.id);
        }
        let mut features = unitvec(acc);

        for var in self.demo_variables {
            features.push(convert_demographic(case, *var)?);
        }
        Ok(features)
    }

    /// Encode a batch of instances into a dense matrix, preserving order
    ///
    /// Rows are independent, so encoding fans out over rayon; the indexed
    /// collection keeps the sequential order.
    pub fn encode_all(&self, instances: &[(&PatientCase, ExpandedInstance)]) -> Result<FeatureMatrix> {
        let rows: Vec<Vec<f32>> = instances
            .par_iter()
            .map(|(case, instance)| self.encode(case, instance))
            .collect::<Result<_>>()?;

        let mut matrix = FeatureMatrix::with_columns(self.feature_len());
        for row in &rows {
            matrix.push_row(row);
        }
        Ok(matrix)
    }

    /// Add every token vector of every listed code onto the accumulator
    fn accumulate(&self, acc: &mut [f32], codes: &[String], prefix: &str) -> Result<()> {
        for code in codes {
            let key = format!("{prefix}{code}");
            let vectors = self
                .store
                .token_vectors(&key)
                .ok_or_else(|| PcReaderError::UnknownCode(key.clone()))?;
            // sum over all token vectors, not just the aggregate
            for vector in vectors {
                for (slot, value) in acc.iter_mut().zip(vector) {
                    *slot += value;
                }
            }
        }
        Ok(())
    }
}

/// Convert one demographic field of a case to its scalar feature value
///
/// `sex` maps to +1.0 for "M"/"m" and -1.0 otherwise; every other variable
/// must parse as a floating-point number.
pub fn convert_demographic(case: &PatientCase, var: DemoVariable) -> Result<f32> {
    let value = case.demographic(var);
    if var == DemoVariable::Sex {
        return Ok(if value.eq_ignore_ascii_case("m") { 1.0 } else { -1.0 });
    }
    value
        .trim()
        .parse()
        .map_err(|_| PcReaderError::InvalidDemographicValue {
            variable: var.to_string(),
            value: value.to_string(),
        })
}
