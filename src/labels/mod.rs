//! DRG label reader
//!
//! Loads the auxiliary `id;drg` side file into a read-only map. The map is
//! required only for the drg task, where every case id must resolve.

use crate::error::{PcReaderError, Result};
use log::info;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Case id → DRG code mapping
#[derive(Debug, Clone, Default)]
pub struct DrgLabelMap {
    drg_by_id: FxHashMap<String, String>,
}

impl DrgLabelMap {
    /// Load the mapping from a semicolon-delimited `id;drg` file
    ///
    /// A duplicated id keeps the last row's label.
    pub fn read_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut drg_by_id = FxHashMap::default();

        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let mut parts = line.split(';');
            let id = parts.next().unwrap_or("").trim();
            let drg = parts.next().map(str::trim).unwrap_or("");
            if id.is_empty() || drg.is_empty() {
                return Err(PcReaderError::parse(
                    line_no,
                    "expected \"id;drg\" with both fields present",
                ));
            }
            drg_by_id.insert(id.to_string(), drg.to_string());
        }

        info!("Read {} DRG labels from {}", drg_by_id.len(), path.display());
        Ok(Self { drg_by_id })
    }

    /// DRG label for a case id
    ///
    /// The drg task is a 1:1 mapping; a miss fails the run.
    pub fn lookup(&self, id: &str) -> Result<&str> {
        self.drg_by_id
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| PcReaderError::UnknownCaseId(id.to_string()))
    }

    /// Number of labeled cases
    #[must_use]
    pub fn len(&self) -> usize {
        self.drg_by_id.len()
    }

    /// Whether the map holds no labels
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drg_by_id.is_empty()
    }
}
