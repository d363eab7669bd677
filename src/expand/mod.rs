//! Instance expansion engine
//!
//! Converts one parsed patient case into zero or more labeled training
//! instances, depending on the active task. Codes are normalized and checked
//! against the vector store first; the sdx and srg tasks then apply
//! leave-one-out expansion, one instance per held-out code, so instance
//! count deliberately exceeds case count. A case whose primary diagnosis is
//! missing or invalid produces no instances and is counted, not erroneous.

use crate::config::Task;
use crate::error::{PcReaderError, Result};
use crate::labels::DrgLabelMap;
use crate::models::PatientCase;
use crate::vectors::CodeVectorStore;
use log::debug;
use smallvec::SmallVec;
use std::iter::once;

/// Catalog prefix under which diagnosis codes are stored
pub const DIAGNOSIS_PREFIX: &str = "ICD_";

/// Catalog prefix under which procedure codes are stored
pub const PROCEDURE_PREFIX: &str = "CHOP_";

/// Bring a raw code into catalog form: no dots, uppercase
#[must_use]
pub fn normalize_code(raw: &str) -> String {
    raw.replace('.', "").to_uppercase()
}

/// One labeled training instance produced from a patient case
///
/// Code lists hold normalized, store-validated codes without their catalog
/// prefix. Within one case, instance order follows the source code order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedInstance {
    /// Diagnosis context for this instance
    pub diagnoses: Vec<String>,
    /// Procedure context for this instance
    pub procedures: Vec<String>,
    /// Prediction target: a code string, or a DRG for the drg task
    pub label: String,
}

/// Expands patient cases into training instances for one task
///
/// Stateless across cases apart from the rejected-case counter.
pub struct InstanceExpander<'a> {
    store: &'a CodeVectorStore,
    drg_labels: Option<&'a DrgLabelMap>,
    task: Task,
    rejected_cases: usize,
}

impl<'a> InstanceExpander<'a> {
    /// Create an expander for a task
    ///
    /// Fails fast if the drg task is requested without a label map.
    pub fn new(
        store: &'a CodeVectorStore,
        drg_labels: Option<&'a DrgLabelMap>,
        task: Task,
    ) -> Result<Self> {
        if task.requires_drg_labels() && drg_labels.is_none() {
            return Err(PcReaderError::Configuration(
                "the drg task requires a DRG label file".to_string(),
            ));
        }
        Ok(Self {
            store,
            drg_labels,
            task,
            rejected_cases: 0,
        })
    }

    /// The task this expander was built for
    #[must_use]
    pub const fn task(&self) -> Task {
        self.task
    }

    /// Number of cases rejected for a missing or invalid primary diagnosis
    #[must_use]
    pub const fn rejected_cases(&self) -> usize {
        self.rejected_cases
    }

    /// Expand one case into its training instances
    ///
    /// Returns an empty vector for a rejected case (counted) and for sdx/srg
    /// cases without any valid held-out candidate.
    pub fn expand(&mut self, case: &PatientCase) -> Result<Vec<ExpandedInstance>> {
        let diags = self.valid_codes(&case.additional_diagnoses, DIAGNOSIS_PREFIX);
        let procs = self.valid_codes(&case.procedures, PROCEDURE_PREFIX);

        // Do not use this patient case if the PDX is missing or invalid
        let pdx = normalize_code(&case.pdx);
        if pdx.is_empty() || !self.store.contains(&format!("{DIAGNOSIS_PREFIX}{pdx}")) {
            self.rejected_cases += 1;
            debug!("Rejecting case {}: missing or invalid primary diagnosis", case.id);
            return Ok(Vec::new());
        }

        let instances = match self.task {
            Task::Pdx => vec![ExpandedInstance {
                diagnoses: diags.to_vec(),
                procedures: procs.to_vec(),
                label: pdx,
            }],
            Task::Sdx => diags
                .iter()
                .map(|gt| ExpandedInstance {
                    diagnoses: diags
                        .iter()
                        .filter(|d| d.as_str() != gt.as_str())
                        .cloned()
                        .chain(once(pdx.clone()))
                        .collect(),
                    procedures: procs.to_vec(),
                    label: gt.clone(),
                })
                .collect(),
            Task::Srg => procs
                .iter()
                .map(|gt| ExpandedInstance {
                    diagnoses: diags.iter().cloned().chain(once(pdx.clone())).collect(),
                    procedures: procs
                        .iter()
                        .filter(|p| p.as_str() != gt.as_str())
                        .cloned()
                        .collect(),
                    label: gt.clone(),
                })
                .collect(),
            Task::Drg => {
                let labels = self.drg_labels.ok_or_else(|| {
                    PcReaderError::Configuration(
                        "the drg task requires a DRG label file".to_string(),
                    )
                })?;
                let label = labels.lookup(&case.id)?.to_string();
                vec![ExpandedInstance {
                    diagnoses: diags.iter().cloned().chain(once(pdx)).collect(),
                    procedures: procs.to_vec(),
                    label,
                }]
            }
        };
        Ok(instances)
    }

    /// Normalize a raw code list and keep the codes known to the store
    fn valid_codes(&self, raw: &[String], prefix: &str) -> SmallVec<[String; 8]> {
        raw.iter()
            .map(|code| normalize_code(code))
            .filter(|code| !code.is_empty())
            .filter(|code| self.store.contains(&format!("{prefix}{code}")))
            .collect()
    }
}
