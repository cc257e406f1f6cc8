use serde::{Deserialize, Serialize};

/// One candidate word scored against the daily word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRecord {
    pub word: String,
    /// Oracle similarity × 100, rounded to two decimals.
    pub similarity: f64,
    /// Inverted closeness ordinal; only the 1000 closest words carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    /// 0–100 min–max remap of `similarity`, only after [`normalize_scores`](super::normalize_scores).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SimilarityRecord {
    pub fn new(word: impl Into<String>, similarity: f64) -> Self {
        Self {
            word: word.into(),
            similarity,
            rank: None,
            score: None,
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.rank.is_some()
    }
}

/// Counters gathered during one ranking pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankingStats {
    /// Candidates compared (wordlist minus the target).
    pub candidates: usize,
    /// Candidates skipped for lacking a vector.
    pub without_vector: usize,
    /// Candidates dropped by the similarity threshold.
    pub below_threshold: usize,
    /// Records kept before truncation.
    pub matched: usize,
    /// Records carrying a rank.
    pub ranked: usize,
    /// Records returned after truncation.
    pub returned: usize,
}

/// Output of [`SimilarityRanker::rank`](super::SimilarityRanker::rank).
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// Sorted by descending similarity, rank-annotated, truncated to `top_k`.
    pub records: Vec<SimilarityRecord>,
    pub stats: RankingStats,
}

impl Ranking {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<SimilarityRecord> {
        self.records
    }
}
