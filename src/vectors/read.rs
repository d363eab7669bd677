//! Parsers for the token-vector and code-token input files.

use crate::error::{PcReaderError, Result};
use crate::vectors::TokenVector;
use log::info;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a token-vector file into a token → vector map
///
/// Each row is whitespace-delimited: the token followed by its embedding
/// components. A leading word2vec-style header row (vocabulary size and
/// dimensionality only) is skipped. Every vector must have the same
/// dimensionality.
pub fn read_token_vectors(path: &Path) -> Result<FxHashMap<String, TokenVector>> {
    let file = File::open(path)?;
    let mut vector_by_token = FxHashMap::default();
    let mut dims = None;

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(token) = parts.next() else {
            continue;
        };
        let components: Vec<&str> = parts.collect();

        // word2vec writes "<vocab size> <dims>" as its first line
        if line_no == 1
            && components.len() == 1
            && token.parse::<usize>().is_ok()
            && components[0].parse::<usize>().is_ok()
        {
            continue;
        }

        if components.is_empty() {
            return Err(PcReaderError::parse(
                line_no,
                format!("token {token:?} has no vector components"),
            ));
        }

        let mut vector = Vec::with_capacity(components.len());
        for component in &components {
            let value: f32 = component.parse().map_err(|_| {
                PcReaderError::parse(
                    line_no,
                    format!("invalid vector component {component:?} for token {token:?}"),
                )
            })?;
            vector.push(value);
        }

        match dims {
            None => dims = Some(vector.len()),
            Some(expected) if expected != vector.len() => {
                return Err(PcReaderError::parse(
                    line_no,
                    format!(
                        "token {token:?} has {} components, expected {expected}",
                        vector.len()
                    ),
                ));
            }
            Some(_) => {}
        }

        vector_by_token.insert(token.to_string(), vector);
    }

    info!(
        "Read {} token vectors from {}",
        vector_by_token.len(),
        path.display()
    );
    Ok(vector_by_token)
}

/// Read a code-token file into (code, tokens) pairs in file order
///
/// Each row is semicolon-delimited: the code followed by the tokens of its
/// description. Empty token slots are dropped.
pub fn read_code_tokens(path: &Path) -> Result<Vec<(String, Vec<String>)>> {
    let file = File::open(path)?;
    let mut code_tokens = Vec::new();

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut parts = line.split(';');
        let code = parts.next().unwrap_or("").trim();
        if code.is_empty() {
            return Err(PcReaderError::parse(line_no, "row has no code"));
        }

        let tokens: Vec<String> = parts
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        code_tokens.push((code.to_string(), tokens));
    }

    info!(
        "Read token lists for {} codes from {}",
        code_tokens.len(),
        path.display()
    );
    Ok(code_tokens)
}
