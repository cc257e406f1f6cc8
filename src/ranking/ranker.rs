use std::cmp::Ordering;
use tracing::{debug, info};

use crate::constants::{DEFAULT_MIN_SIMILARITY, DEFAULT_TOP_K, RANKED_WINDOW};
use crate::oracle::VectorOracle;
use crate::wordlist::Wordlist;

use super::error::RankingError;
use super::types::{Ranking, RankingStats, SimilarityRecord};
use super::{assign_ranks, round_similarity};

/// Ranking parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankerConfig {
    /// Raw oracle similarity a candidate needs to be kept (inclusive).
    pub min_similarity: f64,
    /// Maximum records returned; `0` keeps everything.
    pub top_k: usize,
    /// Size of the rank-annotated head.
    pub ranked_window: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            min_similarity: DEFAULT_MIN_SIMILARITY,
            top_k: DEFAULT_TOP_K,
            ranked_window: RANKED_WINDOW,
        }
    }
}

impl RankerConfig {
    pub fn new(min_similarity: f64, top_k: usize) -> Self {
        Self {
            min_similarity,
            top_k,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), RankingError> {
        if !self.min_similarity.is_finite() {
            return Err(RankingError::InvalidConfig {
                reason: format!("min_similarity must be finite, got {}", self.min_similarity),
            });
        }
        Ok(())
    }
}

/// Scores every wordlist entry against the daily word.
///
/// No randomness: the same target, wordlist and oracle always give identical output.
#[derive(Debug, Clone, Default)]
pub struct SimilarityRanker {
    config: RankerConfig,
}

impl SimilarityRanker {
    pub fn new(config: RankerConfig) -> Result<Self, RankingError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    pub fn rank<O>(
        &self,
        target_word: &str,
        wordlist: &Wordlist,
        oracle: &O,
    ) -> Result<Ranking, RankingError>
    where
        O: VectorOracle + ?Sized,
    {
        let target = oracle.vector_of(target_word);
        if target.is_empty() {
            return Err(RankingError::MissingTargetVector {
                word: target_word.to_string(),
                oracle: oracle.describe(),
            });
        }

        let candidates: Vec<String> = wordlist
            .iter()
            .filter(|w| w.as_str() != target_word)
            .cloned()
            .collect();

        debug!(
            target = %target_word,
            candidates = candidates.len(),
            min_similarity = self.config.min_similarity,
            "Computing similarities"
        );

        let mut stats = RankingStats {
            candidates: candidates.len(),
            ..Default::default()
        };

        let vectors = oracle.vectors_of(&candidates);
        let mut records = Vec::with_capacity(candidates.len());

        for (word, vector) in candidates.into_iter().zip(vectors) {
            if vector.is_empty() {
                stats.without_vector += 1;
                continue;
            }

            let similarity = oracle.similarity(&target, &vector);
            if similarity.is_nan() || similarity < self.config.min_similarity {
                stats.below_threshold += 1;
                continue;
            }

            records.push(SimilarityRecord::new(word, round_similarity(similarity)));
        }

        // Stable: equal similarities keep wordlist order.
        records.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });

        stats.matched = records.len();
        stats.ranked = assign_ranks(&mut records, self.config.ranked_window);

        if self.config.top_k > 0 && records.len() > self.config.top_k {
            records.truncate(self.config.top_k);
        }
        stats.returned = records.len();

        info!(
            target = %target_word,
            matched = stats.matched,
            returned = stats.returned,
            without_vector = stats.without_vector,
            below_threshold = stats.below_threshold,
            "Similarity ranking complete"
        );

        Ok(Ranking { records, stats })
    }
}
