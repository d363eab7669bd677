use anyhow::{Context, bail};
use log::{info, warn};
use pc_reader::{CodeVectorStore, DrgLabelMap, PipelineConfig, Task, read_flat_dataset};
use std::path::PathBuf;
use std::time::Instant;

const USAGE: &str = "usage: pc-reader <case-file> <vectors-file> <tokens-file> [drg-file] \
                     [--config <json>] [--task <pdx|sdx|srg|drg|all>]";

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut positional: Vec<String> = Vec::new();
    let mut config_path: Option<PathBuf> = None;
    let mut task_arg: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(args.next().context("--config expects a path")?.into());
            }
            "--task" => task_arg = Some(args.next().context("--task expects a value")?),
            _ => positional.push(arg),
        }
    }
    if positional.len() < 3 || positional.len() > 4 {
        bail!("{USAGE}");
    }
    let case_file = PathBuf::from(&positional[0]);
    let vectors_file = PathBuf::from(&positional[1]);
    let tokens_file = PathBuf::from(&positional[2]);
    let drg_file = positional.get(3).map(PathBuf::from);

    let config = match config_path {
        Some(path) => PipelineConfig::from_json_file(&path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    let start = Instant::now();
    let store = CodeVectorStore::from_files(&vectors_file, &tokens_file, config.missing_tokens)?;
    info!(
        "Loaded vector store with {} codes of {} dimensions in {:?}",
        store.len(),
        store.dims(),
        start.elapsed()
    );

    let drg_labels = match &drg_file {
        Some(path) => Some(DrgLabelMap::read_from_file(path)?),
        None => None,
    };

    let tasks: Vec<Task> = match task_arg.as_deref() {
        None => vec![config.task],
        Some("all") => {
            if drg_labels.is_none() {
                warn!("No DRG label file given; skipping the drg task");
            }
            Task::ALL
                .into_iter()
                .filter(|task| !task.requires_drg_labels() || drg_labels.is_some())
                .collect()
        }
        Some(name) => vec![name.parse::<Task>()?],
    };

    for task in tasks {
        info!("==== {task} ====");
        let mut task_config = config.clone();
        task_config.task = task;

        let start = Instant::now();
        let dataset = read_flat_dataset(&case_file, &store, drg_labels.as_ref(), &task_config)?;
        info!(
            "Built {} x {} dataset with {} classes ({} cases rejected) in {:?}",
            dataset.features.rows(),
            dataset.features.cols(),
            dataset.class_count(),
            dataset.rejected_cases,
            start.elapsed()
        );
    }

    Ok(())
}
