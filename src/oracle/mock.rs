use std::collections::{HashMap, HashSet};

use super::VectorOracle;
use super::vector::WordVector;

/// Oracle returning canned similarities, for ranking tests.
///
/// Pairs are symmetric. Unlisted pairs score `default_similarity` (0.0 unless set).
#[derive(Debug, Clone, Default)]
pub struct MockOracle {
    pairs: HashMap<(String, String), f64>,
    missing: HashSet<String>,
    default_similarity: f64,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the similarity between `a` and `b` (both orders).
    pub fn with_similarity(mut self, a: &str, b: &str, similarity: f64) -> Self {
        self.pairs.insert(Self::key(a, b), similarity);
        self
    }

    /// Marks `word` as having no vector.
    pub fn without_vector(mut self, word: &str) -> Self {
        self.missing.insert(word.to_string());
        self
    }

    /// Similarity returned for pairs that were never configured.
    pub fn with_default_similarity(mut self, similarity: f64) -> Self {
        self.default_similarity = similarity;
        self
    }

    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }
}

impl VectorOracle for MockOracle {
    fn vector_of(&self, word: &str) -> WordVector {
        if self.missing.contains(word) {
            WordVector::empty(word)
        } else {
            WordVector::from_f32(word, &[1.0])
        }
    }

    fn similarity(&self, a: &WordVector, b: &WordVector) -> f64 {
        self.pairs
            .get(&Self::key(a.word(), b.word()))
            .copied()
            .unwrap_or(self.default_similarity)
    }

    fn describe(&self) -> &'static str {
        "mock"
    }
}
