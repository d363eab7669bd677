//! End-to-end flat vectorization over a tiny synthetic corpus.
//!
//! Writes the three input files to a scratch directory, builds the vector
//! store, and produces one dataset per task.

use log::info;
use pc_reader::{CodeVectorStore, DrgLabelMap, PipelineConfig, Task, read_flat_dataset};
use std::fs;
use std::path::PathBuf;

const TOKEN_VECTORS: &str = "\
ICD_A010 1.0 0.0 0.0 0.0
typhoid 0.0 1.0 0.0 0.0
ICD_B021 0.0 0.0 1.0 0.0
ICD_C030 0.0 0.0 0.0 1.0
CHOP_Z371 1.0 1.0 0.0 0.0
appendectomy 0.0 0.0 1.0 1.0
";

const CODE_TOKENS: &str = "\
ICD_A010;ICD_A010;typhoid
ICD_B021;ICD_B021
ICD_C030;ICD_C030
CHOP_Z371;CHOP_Z371;appendectomy
";

const CASES: &str = "\
1;42;0;3500;M;01;00;5;0;0;A01.0;B02.1;C03.0;Z37.1:20
2;7;120;2800;F;01;00;2;0;0;A01.0;B02.1;;Z37.1:10
3;63;0;4100;M;01;00;11;0;24;;B02.1;;
";

const DRGS: &str = "\
1;X12A
2;X40B
3;X12A
";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dir = std::env::temp_dir().join(format!("pc-reader-demo-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let write = |name: &str, content: &str| -> anyhow::Result<PathBuf> {
        let path = dir.join(name);
        fs::write(&path, content)?;
        Ok(path)
    };

    let vectors_file = write("vectors.csv", TOKEN_VECTORS)?;
    let tokens_file = write("tokens.csv", CODE_TOKENS)?;
    let case_file = write("cases.csv", CASES)?;
    let drg_file = write("cases.csv.out", DRGS)?;

    let mut config = PipelineConfig {
        max_additional_diagnoses: 2,
        max_procedures: 1,
        ..PipelineConfig::default()
    };

    let store = CodeVectorStore::from_files(&vectors_file, &tokens_file, config.missing_tokens)?;
    let drg_labels = DrgLabelMap::read_from_file(&drg_file)?;

    for task in Task::ALL {
        info!("==== {task} ====");
        config.task = task;
        let dataset = read_flat_dataset(&case_file, &store, Some(&drg_labels), &config)?;
        info!(
            "{} instances x {} features, {} classes, {} cases rejected",
            dataset.features.rows(),
            dataset.features.cols(),
            dataset.class_count(),
            dataset.rejected_cases
        );
    }

    fs::remove_dir_all(&dir)?;
    Ok(())
}
