//! Assignment of token vectors to medical codes.

use crate::config::MissingTokenPolicy;
use crate::error::{PcReaderError, Result};
use crate::vectors::{TokenVector, read_code_tokens, read_token_vectors, unitvec};
use log::{info, warn};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Per-code embedding vectors derived from token embeddings
///
/// For every code the store holds the ordered list of its token vectors
/// (first entry conventionally the code's own synthetic token, when the
/// tokenization provides one) and a single aggregate vector, the
/// unit-normalized sum over the list. A code absent from the store is
/// invalid and must never reach feature construction.
#[derive(Debug, Clone)]
pub struct CodeVectorStore {
    vectors_by_code: FxHashMap<String, Vec<TokenVector>>,
    vector_by_code: FxHashMap<String, TokenVector>,
    tokens_by_code: FxHashMap<String, Vec<String>>,
    dims: usize,
}

impl CodeVectorStore {
    /// Build the store from the token-vector and code-token files
    pub fn from_files(
        vectors_path: &Path,
        tokens_path: &Path,
        policy: MissingTokenPolicy,
    ) -> Result<Self> {
        let vector_by_token = read_token_vectors(vectors_path)?;
        let code_tokens = read_code_tokens(tokens_path)?;
        Self::from_parts(&vector_by_token, &code_tokens, policy)
    }

    /// Build the store from an in-memory token map and (code, tokens) pairs
    pub fn from_parts(
        vector_by_token: &FxHashMap<String, TokenVector>,
        code_tokens: &[(String, Vec<String>)],
        policy: MissingTokenPolicy,
    ) -> Result<Self> {
        let Some(dims) = vector_by_token.values().next().map(Vec::len) else {
            return Err(PcReaderError::Configuration(
                "token vector map is empty".to_string(),
            ));
        };

        let mut vectors_by_code = FxHashMap::default();
        let mut vector_by_code = FxHashMap::default();
        let mut tokens_by_code = FxHashMap::default();
        let mut omitted = 0usize;

        for (code, tokens) in code_tokens {
            let mut vectors: Vec<TokenVector> = Vec::with_capacity(tokens.len());
            for token in tokens {
                match vector_by_token.get(token) {
                    Some(vector) => {
                        if vector.len() != dims {
                            return Err(PcReaderError::Configuration(format!(
                                "token {token:?} has {} dimensions, expected {dims}",
                                vector.len()
                            )));
                        }
                        vectors.push(vector.clone());
                    }
                    None => match policy {
                        MissingTokenPolicy::Fail => {
                            return Err(PcReaderError::MissingToken {
                                code: code.clone(),
                                token: token.clone(),
                            });
                        }
                        MissingTokenPolicy::Skip => {
                            warn!("Skipping token {token:?} of code {code:?}: no vector");
                        }
                        MissingTokenPolicy::Zero => vectors.push(vec![0.0; dims]),
                    },
                }
            }

            // A code with no surviving vectors would pass validity checks
            // downstream while carrying no signal; leave it out instead.
            if vectors.is_empty() {
                warn!("Omitting code {code:?}: no token has a vector");
                omitted += 1;
                continue;
            }

            let mut sum = vec![0.0f32; dims];
            for vector in &vectors {
                for (acc, value) in sum.iter_mut().zip(vector) {
                    *acc += value;
                }
            }

            vector_by_code.insert(code.clone(), unitvec(sum));
            vectors_by_code.insert(code.clone(), vectors);
            tokens_by_code.insert(code.clone(), tokens.clone());
        }

        if omitted > 0 {
            info!("Omitted {omitted} codes without any token vector");
        }
        info!("Assigned vectors to {} codes", vectors_by_code.len());

        Ok(Self {
            vectors_by_code,
            vector_by_code,
            tokens_by_code,
            dims,
        })
    }

    /// Embedding dimensionality shared by every vector in the store
    #[must_use]
    pub const fn dims(&self) -> usize {
        self.dims
    }

    /// Whether a (prefixed) code is known to the store
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.vectors_by_code.contains_key(code)
    }

    /// Ordered token vectors of a code
    #[must_use]
    pub fn token_vectors(&self, code: &str) -> Option<&[TokenVector]> {
        self.vectors_by_code.get(code).map(Vec::as_slice)
    }

    /// Unit-normalized aggregate vector of a code
    #[must_use]
    pub fn code_vector(&self, code: &str) -> Option<&[f32]> {
        self.vector_by_code.get(code).map(Vec::as_slice)
    }

    /// Tokens of a code's description, in tokenization order
    #[must_use]
    pub fn tokens(&self, code: &str) -> Option<&[String]> {
        self.tokens_by_code.get(code).map(Vec::as_slice)
    }

    /// Number of codes in the store
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors_by_code.len()
    }

    /// Whether the store holds no codes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors_by_code.is_empty()
    }

    /// Write the per-code token-vector lists as JSON, sorted by code
    pub fn export_code_vectors(&self, path: &Path) -> Result<()> {
        let sorted: BTreeMap<&String, &Vec<TokenVector>> = self.vectors_by_code.iter().collect();
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), &sorted).map_err(std::io::Error::other)?;
        info!("Wrote code vectors for {} codes to {}", sorted.len(), path.display());
        Ok(())
    }

    /// Write the per-code token lists as pretty-printed JSON, sorted by code
    pub fn export_code_tokens(&self, path: &Path) -> Result<()> {
        let sorted: BTreeMap<&String, &Vec<String>> = self.tokens_by_code.iter().collect();
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &sorted)
            .map_err(std::io::Error::other)?;
        info!("Wrote token lists for {} codes to {}", sorted.len(), path.display());
        Ok(())
    }
}
