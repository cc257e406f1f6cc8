//! Daily word selection.
//!
//! A date already in the history always gets its recorded word back. Otherwise a
//! word is drawn uniformly from the unused part of the wordlist with a generator
//! seeded from the date alone, so any host recomputes the same pick. Recording the
//! pick is the caller's job ([`crate::history::HistoryStore::record`]).

pub mod error;
pub mod types;


pub use error::SelectionError;
pub use types::{Selection, SelectionOrigin};

use chrono::NaiveDate;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::constants::LOW_INVENTORY_THRESHOLD;
use crate::hashing::date_seed;
use crate::history::{History, date_key};
use crate::wordlist::Wordlist;

#[derive(Debug, Clone)]
pub struct DailyWordSelector {
    low_inventory_threshold: usize,
}

impl Default for DailyWordSelector {
    fn default() -> Self {
        Self {
            low_inventory_threshold: LOW_INVENTORY_THRESHOLD,
        }
    }
}

impl DailyWordSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the unused-word floor below which repeats are allowed again.
    pub fn with_low_inventory_threshold(low_inventory_threshold: usize) -> Self {
        Self {
            low_inventory_threshold,
        }
    }

    pub fn low_inventory_threshold(&self) -> usize {
        self.low_inventory_threshold
    }

    /// Returns the word for `date`. Pure: neither `history` nor any global state changes.
    pub fn select(
        &self,
        wordlist: &Wordlist,
        history: &History,
        date: NaiveDate,
    ) -> Result<Selection, SelectionError> {
        if let Some(word) = history.word_for(date) {
            debug!(date = %date, word = %word, "Daily word already recorded");
            return Ok(Selection {
                date,
                word: word.to_string(),
                origin: SelectionOrigin::Existing,
            });
        }

        if wordlist.is_empty() {
            return Err(SelectionError::EmptyWordlist {
                date: date_key(date),
            });
        }

        let used = history.used_words();
        let unused: Vec<&String> = wordlist
            .iter()
            .filter(|w| !used.contains(w.as_str()))
            .collect();

        let (pool, origin) = if unused.is_empty() || unused.len() < self.low_inventory_threshold {
            warn!(
                date = %date,
                unused = unused.len(),
                threshold = self.low_inventory_threshold,
                "Running low on unused words, allowing repeats"
            );
            let pool: Vec<&String> = wordlist.iter().collect();
            (
                pool,
                SelectionOrigin::Recycled {
                    unused_left: unused.len(),
                },
            )
        } else {
            let available = unused.len();
            (unused, SelectionOrigin::Unused { available })
        };

        let index = draw_index(date_seed(&date_key(date)), pool.len());
        let word = pool[index].clone();

        info!(
            date = %date,
            word = %word,
            pool = pool.len(),
            origin = origin.debug_status(),
            "Daily word selected"
        );

        Ok(Selection { date, word, origin })
    }
}

/// Maps a date seed onto `0..len`.
///
/// Uses the first ChaCha8 output for `seed` and a multiply-shift reduction. Both are
/// fixed across releases and platforms: a recorded date must map to the same index
/// on every host.
pub(crate) fn draw_index(seed: u64, len: usize) -> usize {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    ((u128::from(rng.next_u64()) * len as u128) >> 64) as usize
}
