//! Similarity ranking for the daily word.
//!
//! Pipeline per target word:
//!
//! 1. resolve every candidate through the [`VectorOracle`](crate::oracle::VectorOracle),
//!    skipping words without a vector;
//! 2. keep candidates at or above `min_similarity`, stored as `round(sim * 100, 2)`;
//! 3. stable sort, descending;
//! 4. [`assign_ranks`] on the first 1000 records (closest word gets the *highest* rank);
//! 5. truncate to `top_k`.
//!
//! # Rank numbering
//!
//! Ranks count up towards the target: in a head of `n` records, index `i` gets
//! `n - 1 - i`. The game renders rank as a closeness gauge, so the closest word of a
//! full window shows 999 and the 1000th shows 0. Records past the window carry none.

pub mod error;
pub mod ranker;
pub mod types;


pub use error::RankingError;
pub use ranker::{RankerConfig, SimilarityRanker};
pub use types::{Ranking, RankingStats, SimilarityRecord};

use crate::constants::{SIMILARITY_DECIMALS, SIMILARITY_SCALE};

/// Scales a raw oracle similarity to the stored percentage, two decimals.
#[inline]
pub fn round_similarity(raw: f64) -> f64 {
    let factor = 10f64.powi(SIMILARITY_DECIMALS);
    (raw * SIMILARITY_SCALE * factor).round() / factor
}

/// Annotates the first `window` records (already sorted) with inverted ranks.
///
/// Returns the number of ranked records. Records past the window are left untouched.
pub fn assign_ranks(records: &mut [SimilarityRecord], window: usize) -> usize {
    let head_len = records.len().min(window);
    for (i, record) in records.iter_mut().take(head_len).enumerate() {
        record.rank = Some((head_len - 1 - i) as u32);
    }
    head_len
}

/// Adds a 0–100 `score` to every record by min–max rescaling `similarity`.
///
/// Never applied automatically. When every similarity is equal, every score is 100.
pub fn normalize_scores(records: &mut [SimilarityRecord]) {
    let Some(first) = records.first() else {
        return;
    };

    let (min, max) = records
        .iter()
        .fold((first.similarity, first.similarity), |(lo, hi), r| {
            (lo.min(r.similarity), hi.max(r.similarity))
        });
    let span = max - min;
    let factor = 10f64.powi(SIMILARITY_DECIMALS);

    for record in records.iter_mut() {
        let normalized = if span > 0.0 {
            (record.similarity - min) / span * SIMILARITY_SCALE
        } else {
            SIMILARITY_SCALE
        };
        record.score = Some((normalized * factor).round() / factor);
    }
}
