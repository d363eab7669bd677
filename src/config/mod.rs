//! Run configuration for the vectorization pipeline.
//!
//! All run parameters live in one immutable [`PipelineConfig`] that is passed
//! by reference into each component. Every recognized option is enumerated at
//! the type level; nothing is looked up by string key at runtime.

use crate::error::{PcReaderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Supervised task a dataset is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    /// Predict the primary diagnosis of a case
    Pdx,
    /// Predict a held-out secondary diagnosis (leave-one-out)
    Sdx,
    /// Predict a held-out procedure code (leave-one-out)
    Srg,
    /// Predict the diagnosis-related group assigned to a case
    Drg,
}

impl Task {
    /// All tasks in canonical order
    pub const ALL: [Self; 4] = [Self::Pdx, Self::Sdx, Self::Srg, Self::Drg];

    /// Whether this task needs the auxiliary DRG label map
    #[must_use]
    pub const fn requires_drg_labels(self) -> bool {
        matches!(self, Self::Drg)
    }

    /// Lowercase task name as used in configuration files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdx => "pdx",
            Self::Sdx => "sdx",
            Self::Srg => "srg",
            Self::Drg => "drg",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = PcReaderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pdx" => Ok(Self::Pdx),
            "sdx" => Ok(Self::Sdx),
            "srg" => Ok(Self::Srg),
            "drg" => Ok(Self::Drg),
            other => Err(PcReaderError::Configuration(format!(
                "unknown task {other:?}, expected one of pdx, sdx, srg, drg"
            ))),
        }
    }
}

/// Demographic variables recognized in the case-file prefix
///
/// The configured subset is ordered; the order determines the slot each
/// converted scalar occupies in the encoded feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DemoVariable {
    /// Age in whole years at admission
    AgeYears,
    /// Age remainder in days (infants)
    AgeDays,
    /// Admission weight in grams
    AdmWeight,
    /// Patient sex, converted to +1.0 (male) / -1.0 (other)
    Sex,
    /// Admission category flag
    Adm,
    /// Separation (discharge) category flag
    Sep,
    /// Length of stay in days
    Los,
    /// Short-duration flag
    Sdf,
    /// Hours of mechanical ventilation
    Hmv,
}

impl DemoVariable {
    /// Field name as it appears in the case-file header convention
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AgeYears => "ageYears",
            Self::AgeDays => "ageDays",
            Self::AdmWeight => "admWeight",
            Self::Sex => "sex",
            Self::Adm => "adm",
            Self::Sep => "sep",
            Self::Los => "los",
            Self::Sdf => "sdf",
            Self::Hmv => "hmv",
        }
    }
}

impl fmt::Display for DemoVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DemoVariable {
    type Err = PcReaderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "ageYears" => Ok(Self::AgeYears),
            "ageDays" => Ok(Self::AgeDays),
            "admWeight" => Ok(Self::AdmWeight),
            "sex" => Ok(Self::Sex),
            "adm" => Ok(Self::Adm),
            "sep" => Ok(Self::Sep),
            "los" => Ok(Self::Los),
            "sdf" => Ok(Self::Sdf),
            "hmv" => Ok(Self::Hmv),
            other => Err(PcReaderError::Configuration(format!(
                "unknown demographic variable {other:?}"
            ))),
        }
    }
}

/// Policy for tokens that have no embedding vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTokenPolicy {
    /// Fail the store build with a `MissingToken` error
    #[default]
    Fail,
    /// Drop the token from the code's vector list and log a warning
    Skip,
    /// Substitute an all-zero vector of the embedding dimensionality
    Zero,
}

/// Configuration for one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Which supervised task to expand instances for
    pub task: Task,
    /// Ordered subset of demographic variables appended to each feature row
    pub demo_variables: Vec<DemoVariable>,
    /// Number of additional-diagnosis slots in the case-file tail
    pub max_additional_diagnoses: usize,
    /// Number of procedure slots in the case-file tail
    pub max_procedures: usize,
    /// How to treat description tokens without an embedding
    pub missing_tokens: MissingTokenPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            task: Task::Pdx,
            demo_variables: vec![
                DemoVariable::AdmWeight,
                DemoVariable::Hmv,
                DemoVariable::Sex,
                DemoVariable::Los,
                DemoVariable::AgeYears,
                DemoVariable::AgeDays,
            ],
            max_additional_diagnoses: 99,
            max_procedures: 100,
            missing_tokens: MissingTokenPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file
    ///
    /// Fields absent from the file keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            PcReaderError::Configuration(format!(
                "failed to parse {}: {e}",
                path.display()
            ))
        })
    }
}
