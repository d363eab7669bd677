//! Patient case entity model
//!
//! A [`PatientCase`] is one parsed row of the semicolon-delimited case file:
//! a fixed prefix of named fields followed by bounded lists of additional
//! diagnosis and procedure codes. Rows are immutable once parsed; field
//! values stay raw strings and are converted only where a component needs a
//! scalar, so a malformed value in an unused column never fails a run.

use crate::config::DemoVariable;

/// Number of named fields before the diagnosis/procedure tail
pub const CASE_FIELD_COUNT: usize = 11;

/// One parsed patient case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientCase {
    /// Case identifier, used for DRG label lookups
    pub id: String,
    /// Age in whole years at admission
    pub age_years: String,
    /// Age remainder in days
    pub age_days: String,
    /// Admission weight
    pub adm_weight: String,
    /// Patient sex marker
    pub sex: String,
    /// Admission category flag
    pub adm: String,
    /// Separation category flag
    pub sep: String,
    /// Length of stay
    pub los: String,
    /// Short-duration flag
    pub sdf: String,
    /// Hours of mechanical ventilation
    pub hmv: String,
    /// Primary diagnosis code, raw
    pub pdx: String,
    /// Additional diagnosis codes, raw; empty slots stay as empty strings
    pub additional_diagnoses: Vec<String>,
    /// Procedure codes, raw, type markers already stripped
    pub procedures: Vec<String>,
}

impl PatientCase {
    /// Raw field content for a demographic variable
    #[must_use]
    pub fn demographic(&self, var: DemoVariable) -> &str {
        match var {
            DemoVariable::AgeYears => &self.age_years,
            DemoVariable::AgeDays => &self.age_days,
            DemoVariable::AdmWeight => &self.adm_weight,
            DemoVariable::Sex => &self.sex,
            DemoVariable::Adm => &self.adm,
            DemoVariable::Sep => &self.sep,
            DemoVariable::Los => &self.los,
            DemoVariable::Sdf => &self.sdf,
            DemoVariable::Hmv => &self.hmv,
        }
    }
}
