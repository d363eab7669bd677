//! Tabular case reader
//!
//! Parses the semicolon-delimited patient-case file: a fixed prefix of named
//! fields followed by a variable-length tail of diagnosis and procedure
//! codes. The tail is projected positionally into two bounded slots sized by
//! configuration: the first `max_additional_diagnoses` entries are additional
//! diagnoses, the next `max_procedures` entries are procedures (each possibly
//! carrying a `:<type>` marker that is stripped here). Empty slots survive as
//! empty strings for downstream filtering. A row with fewer fields than the
//! fixed prefix aborts the whole read.

use crate::config::PipelineConfig;
use crate::error::{PcReaderError, Result};
use crate::models::{CASE_FIELD_COUNT, PatientCase};
use crate::utils::progress;
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read every patient case from a case file
///
/// Blank lines are ignored; any malformed line fails the read with a
/// line-numbered parse error.
pub fn read_case_file(path: &Path, config: &PipelineConfig) -> Result<Vec<PatientCase>> {
    let file = File::open(path)?;
    let lines: Vec<String> = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<_>>()?;

    let pb = progress::row_progress_bar(lines.len() as u64, "Reading patient cases");
    let mut cases = Vec::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        if !line.trim().is_empty() {
            cases.push(parse_case_line(line, idx + 1, config)?);
        }
        pb.inc(1);
    }
    progress::finish(&pb, "Cases read");

    info!("Read {} patient cases from {}", cases.len(), path.display());
    Ok(cases)
}

/// Parse one case-file line
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_case_line(line: &str, line_no: usize, config: &PipelineConfig) -> Result<PatientCase> {
    let fields: Vec<&str> = line.split(';').collect();
    if fields.len() < CASE_FIELD_COUNT {
        return Err(PcReaderError::parse(
            line_no,
            format!(
                "expected at least {CASE_FIELD_COUNT} fields, found {}",
                fields.len()
            ),
        ));
    }

    let tail = &fields[CASE_FIELD_COUNT..];
    let additional_diagnoses = tail
        .iter()
        .take(config.max_additional_diagnoses)
        .map(|entry| entry.trim().to_string())
        .collect();
    // Procedure entries may carry a ":<type>" marker; only the code is kept
    let procedures = tail
        .iter()
        .skip(config.max_additional_diagnoses)
        .take(config.max_procedures)
        .map(|entry| entry.split(':').next().unwrap_or("").trim().to_string())
        .collect();

    Ok(PatientCase {
        id: fields[0].trim().to_string(),
        age_years: fields[1].trim().to_string(),
        age_days: fields[2].trim().to_string(),
        adm_weight: fields[3].trim().to_string(),
        sex: fields[4].trim().to_string(),
        adm: fields[5].trim().to_string(),
        sep: fields[6].trim().to_string(),
        los: fields[7].trim().to_string(),
        sdf: fields[8].trim().to_string(),
        hmv: fields[9].trim().to_string(),
        pdx: fields[10].trim().to_string(),
        additional_diagnoses,
        procedures,
    })
}
