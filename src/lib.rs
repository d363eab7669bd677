//! A Rust library for vectorizing tokenized medical codes and expanding
//! patient cases into flat training datasets for clinical prediction tasks.

pub mod config;
pub mod encode;
pub mod error;
pub mod expand;
pub mod labels;
pub mod models;
pub mod pipeline;
pub mod reader;
pub mod utils;
pub mod vectors;

// Re-export the most common types for easier use
// Core types
pub use config::{DemoVariable, MissingTokenPolicy, PipelineConfig, Task};
pub use error::{PcReaderError, Result};
pub use models::PatientCase;

// Vector store
pub use vectors::{CodeVectorStore, read_code_tokens, read_token_vectors, unitvec};

// Case and label readers
pub use labels::DrgLabelMap;
pub use reader::{parse_case_line, read_case_file};

// Expansion and encoding
pub use encode::{FeatureMatrix, FlatEncoder, convert_demographic};
pub use expand::{ExpandedInstance, InstanceExpander, normalize_code};

// Pipeline entry point
pub use pipeline::{FlatDataset, read_flat_dataset};
