use serde::{Deserialize, Serialize};

use crate::constants::{TARGET_RANK, TARGET_SIMILARITY};
use crate::ranking::SimilarityRecord;

/// The day's artifact served to clients: date, word and ranked similarities.
///
/// Re-derivable at any time from history + wordlist + oracle; it is a cache, not a
/// source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    pub word: String,
    pub similarities: Vec<SimilarityRecord>,
}

impl DailySnapshot {
    pub fn new(
        date: impl Into<String>,
        word: impl Into<String>,
        similarities: Vec<SimilarityRecord>,
    ) -> Self {
        Self {
            date: date.into(),
            word: word.into(),
            similarities,
        }
    }

    /// Looks up a normalized guess (trimmed, lowercased).
    ///
    /// Returns `None` for words that are neither the target nor in the list.
    pub fn evaluate_guess(&self, guess: &str) -> Option<GuessOutcome> {
        let guess = normalize_guess(guess);
        if guess.is_empty() {
            return None;
        }

        if guess == self.word.to_lowercase() {
            return Some(GuessOutcome {
                word: guess,
                similarity: TARGET_SIMILARITY,
                rank: Some(TARGET_RANK),
                is_correct: true,
            });
        }

        self.similarities
            .iter()
            .find(|r| r.word.to_lowercase() == guess)
            .map(|r| GuessOutcome {
                word: guess.clone(),
                similarity: r.similarity,
                rank: r.rank,
                is_correct: false,
            })
    }

    /// The `limit` closest words, in snapshot order.
    pub fn top_words(&self, limit: usize) -> Vec<TopWord> {
        self.similarities
            .iter()
            .take(limit)
            .map(|r| TopWord {
                word: r.word.clone(),
                similarity: r.similarity,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.similarities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.similarities.is_empty()
    }
}

/// Trims and lowercases user input.
pub fn normalize_guess(guess: &str) -> String {
    guess.trim().to_lowercase()
}

/// Result of scoring one guess against a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub word: String,
    pub similarity: f64,
    pub rank: Option<u32>,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

/// Entry of the top-words view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopWord {
    pub word: String,
    pub similarity: f64,
}
