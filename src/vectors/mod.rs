//! Code vector store
//!
//! Loads per-token embedding vectors and assigns them to medical codes: for
//! each code an ordered list of its token vectors, and one aggregate vector
//! that is the unit-normalized sum over all of them.

pub mod read;
pub mod store;

pub use read::{read_code_tokens, read_token_vectors};
pub use store::CodeVectorStore;

/// A single embedding vector
pub type TokenVector = Vec<f32>;

/// Scale a vector to unit Euclidean norm
///
/// A zero-magnitude input is returned unchanged; a fully out-of-vocabulary
/// accumulation is a legitimate all-zero feature, not an error.
#[must_use]
pub fn unitvec(mut v: Vec<f32>) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut v {
            *x /= norm;
        }
    }
    v
}
