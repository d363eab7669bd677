//! Batch pipeline driver
//!
//! One pass over a case file: parse rows, expand each into task instances,
//! encode everything into a dense matrix with a parallel label vector.
//! Failures abort the batch; the only tolerated data-quality condition is a
//! missing or invalid primary diagnosis, which is counted per case.

use crate::config::PipelineConfig;
use crate::encode::{FeatureMatrix, FlatEncoder};
use crate::error::Result;
use crate::expand::{ExpandedInstance, InstanceExpander};
use crate::labels::DrgLabelMap;
use crate::models::PatientCase;
use crate::reader::read_case_file;
use crate::vectors::CodeVectorStore;
use itertools::Itertools;
use log::info;
use std::path::Path;

/// Result of one flat vectorization run
#[derive(Debug, Clone)]
pub struct FlatDataset {
    /// Dense instances × feature-length matrix
    pub features: FeatureMatrix,
    /// Target label per instance, parallel to the matrix rows
    pub targets: Vec<String>,
    /// Cases skipped for a missing or invalid primary diagnosis
    pub rejected_cases: usize,
}

impl FlatDataset {
    /// Number of distinct target labels
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.targets.iter().unique().count()
    }
}

/// Read a case file and build the flat dataset for the configured task
///
/// The DRG label map is only consulted for the drg task, but requesting that
/// task without one fails before any row is read.
pub fn read_flat_dataset(
    case_file: &Path,
    store: &CodeVectorStore,
    drg_labels: Option<&DrgLabelMap>,
    config: &PipelineConfig,
) -> Result<FlatDataset> {
    let mut expander = InstanceExpander::new(store, drg_labels, config.task)?;
    let cases = read_case_file(case_file, config)?;

    let mut instances: Vec<(&PatientCase, ExpandedInstance)> = Vec::new();
    for case in &cases {
        for instance in expander.expand(case)? {
            instances.push((case, instance));
        }
    }
    info!(
        "Expanded {} cases into {} instances for task {}",
        cases.len(),
        instances.len(),
        config.task
    );
    info!(
        "Skipped patient cases due to invalid PDX: {}",
        expander.rejected_cases()
    );

    let encoder = FlatEncoder::new(store, &config.demo_variables);
    let features = encoder.encode_all(&instances)?;
    let targets = instances
        .into_iter()
        .map(|(_, instance)| instance.label)
        .collect();

    Ok(FlatDataset {
        features,
        targets,
        rejected_cases: expander.rejected_cases(),
    })
}
