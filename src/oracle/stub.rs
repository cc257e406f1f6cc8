use tracing::warn;

use super::VectorOracle;
use super::error::{OracleError, OracleResult};
use super::vector::{WordVector, cosine_similarity, normalize_in_place};
use crate::constants::DEFAULT_STUB_DIM;

/// Deterministic oracle for development without an embedding model.
///
/// Each word maps to a pseudo-random unit vector expanded from its BLAKE3 hash, so
/// similarities are stable but carry no meaning. The empty string has no vector.
#[derive(Debug, Clone)]
pub struct StubOracle {
    dim: usize,
}

impl Default for StubOracle {
    fn default() -> Self {
        Self {
            dim: DEFAULT_STUB_DIM,
        }
    }
}

impl StubOracle {
    /// Creates a stub producing `dim`-dimensional vectors.
    pub fn new(dim: usize) -> OracleResult<Self> {
        if dim == 0 {
            return Err(OracleError::InvalidConfig {
                reason: "stub vector dimension cannot be zero".to_string(),
            });
        }
        warn!(dim, "Vector oracle running in STUB mode (similarities are meaningless)");
        Ok(Self { dim })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn expand(&self, word: &str) -> Vec<f32> {
        let mut reader = blake3::Hasher::new()
            .update(word.as_bytes())
            .finalize_xof();

        let mut buf = [0u8; 4];
        let mut values = Vec::with_capacity(self.dim);
        for _ in 0..self.dim {
            reader.fill(&mut buf);
            let raw = u32::from_le_bytes(buf);
            values.push((raw as f32 / u32::MAX as f32) * 2.0 - 1.0);
        }

        normalize_in_place(&mut values);
        values
    }
}

impl VectorOracle for StubOracle {
    fn vector_of(&self, word: &str) -> WordVector {
        if word.is_empty() {
            return WordVector::empty(word);
        }
        WordVector::from_f32(word, &self.expand(word))
    }

    fn similarity(&self, a: &WordVector, b: &WordVector) -> f64 {
        cosine_similarity(a.values(), b.values())
    }

    fn describe(&self) -> &'static str {
        "stub"
    }
}
