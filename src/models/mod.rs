//! Data models for patient-case rows.

pub mod case;

pub use case::{CASE_FIELD_COUNT, PatientCase};
