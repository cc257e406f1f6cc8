//! Vector oracle: the semantic model behind the ranking.
//!
//! The ranker sees the model only through [`VectorOracle`], which has two
//! operations: resolve a word to a [`WordVector`] (possibly the empty sentinel),
//! and compare two vectors. Providers:
//!
//! - [`StaticVectorOracle`] loads static embeddings from a word2vec text file.
//! - [`StubOracle`] produces deterministic hashed vectors (no model files).
//! - `MockOracle` returns canned similarities (tests, `mock` feature).

pub mod error;
pub mod static_vectors;
pub mod stub;
pub mod vector;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::{OracleError, OracleResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockOracle;
pub use static_vectors::StaticVectorOracle;
pub use stub::StubOracle;
pub use vector::{WordVector, cosine_similarity};

use std::path::Path;
use std::sync::Arc;

use tracing::warn;

/// Semantic similarity provider.
///
/// Implementations must be pure: the same inputs always give the same outputs.
pub trait VectorOracle: Send + Sync {
    /// Resolves `word`, returning the empty sentinel when it has no usable vector.
    fn vector_of(&self, word: &str) -> WordVector;

    /// Similarity of two resolved vectors, in `[-1, 1]`.
    fn similarity(&self, a: &WordVector, b: &WordVector) -> f64;

    /// Resolves many words at once. Output order matches `words`.
    fn vectors_of(&self, words: &[String]) -> Vec<WordVector> {
        words.iter().map(|w| self.vector_of(w)).collect()
    }

    /// Short provider name for logs and readiness output.
    fn describe(&self) -> &'static str {
        "custom"
    }
}

/// Builds the configured oracle: static vectors when a path is set, else the stub.
pub fn build_oracle(vectors_path: Option<&Path>) -> OracleResult<Arc<dyn VectorOracle>> {
    match vectors_path {
        Some(path) => Ok(Arc::new(StaticVectorOracle::load(path)?)),
        None => {
            warn!("No SEMANTLE_VECTORS_PATH configured, falling back to stub oracle");
            Ok(Arc::new(StubOracle::default()))
        }
    }
}
