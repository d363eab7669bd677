//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use pc_reader::{CodeVectorStore, MissingTokenPolicy, PatientCase};
use rustc_hash::FxHashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Token vocabulary used across the tests, dimensionality 4
#[must_use]
pub fn vector_by_token() -> FxHashMap<String, Vec<f32>> {
    let mut map = FxHashMap::default();
    map.insert("ICD_A01".to_string(), vec![1.0, 0.0, 0.0, 0.0]);
    map.insert("typhoid".to_string(), vec![0.0, 1.0, 0.0, 0.0]);
    map.insert("ICD_B02".to_string(), vec![0.0, 0.0, 1.0, 0.0]);
    map.insert("ICD_C03".to_string(), vec![0.0, 0.0, 0.0, 1.0]);
    map.insert("CHOP_P01".to_string(), vec![1.0, 1.0, 0.0, 0.0]);
    map.insert("incision".to_string(), vec![0.0, 0.0, 1.0, 1.0]);
    map.insert("CHOP_P02".to_string(), vec![2.0, 0.0, 0.0, 0.0]);
    map
}

/// Code → token lists matching [`vector_by_token`]
#[must_use]
pub fn code_tokens() -> Vec<(String, Vec<String>)> {
    vec![
        (
            "ICD_A01".to_string(),
            vec!["ICD_A01".to_string(), "typhoid".to_string()],
        ),
        ("ICD_B02".to_string(), vec!["ICD_B02".to_string()]),
        ("ICD_C03".to_string(), vec!["ICD_C03".to_string()]),
        (
            "CHOP_P01".to_string(),
            vec!["CHOP_P01".to_string(), "incision".to_string()],
        ),
        ("CHOP_P02".to_string(), vec!["CHOP_P02".to_string()]),
    ]
}

/// Vector store over the shared vocabulary
#[must_use]
pub fn store() -> CodeVectorStore {
    CodeVectorStore::from_parts(&vector_by_token(), &code_tokens(), MissingTokenPolicy::Fail)
        .unwrap()
}

/// A patient case with plausible demographics and the given codes
#[must_use]
pub fn case(id: &str, pdx: &str, diagnoses: &[&str], procedures: &[&str]) -> PatientCase {
    PatientCase {
        id: id.to_string(),
        age_years: "42".to_string(),
        age_days: "0".to_string(),
        adm_weight: "3500".to_string(),
        sex: "M".to_string(),
        adm: "01".to_string(),
        sep: "00".to_string(),
        los: "5".to_string(),
        sdf: "0".to_string(),
        hmv: "0".to_string(),
        pdx: pdx.to_string(),
        additional_diagnoses: diagnoses.iter().map(ToString::to_string).collect(),
        procedures: procedures.iter().map(ToString::to_string).collect(),
    }
}

static SCRATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Write a scratch input file with a process-unique name
#[must_use]
pub fn write_scratch(name: &str, content: &str) -> PathBuf {
    let counter = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "pc-reader-test-{}-{counter}-{name}",
        std::process::id()
    ));
    std::fs::write(&path, content).unwrap();
    path
}

/// Absolute difference comparison for float vectors
pub fn assert_vec_close(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len(), "vector length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() < 1e-6,
            "component {i}: {a} differs from {e}"
        );
    }
}
