//! Persistent date → word record, the source of truth for which word was used when.
//!
//! The whole mapping is loaded per invocation, mutated in memory, and rewritten in
//! full through [`crate::storage::atomic_write`]. Keys are ISO dates; a `BTreeMap`
//! keeps the JSON sorted so the file diffs cleanly.

pub mod error;


pub use error::{HistoryError, HistoryResult};

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::DATE_FORMAT;
use crate::storage::atomic_write;

const SEED_SUFFIX: &str = "seed";

/// Formats `date` the way history keys and snapshots store it.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Date → word assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: BTreeMap<String, String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Word recorded for `date`, if any.
    pub fn word_for(&self, date: NaiveDate) -> Option<&str> {
        self.entries.get(&date_key(date)).map(String::as_str)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date_key(date))
    }

    /// Every word that has already been a daily word.
    pub fn used_words(&self) -> HashSet<&str> {
        self.entries.values().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(d, w)| (d.as_str(), w.as_str()))
    }

    fn insert(&mut self, date: NaiveDate, word: &str) -> Option<String> {
        self.entries.insert(date_key(date), word.to_string())
    }

    fn validate(&self, path: &Path) -> HistoryResult<()> {
        for (date, word) in &self.entries {
            if NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
                return Err(HistoryError::Corrupt {
                    path: path.to_path_buf(),
                    reason: format!("key '{}' is not a {} date", date, DATE_FORMAT),
                });
            }
            if word.trim().is_empty() {
                return Err(HistoryError::Corrupt {
                    path: path.to_path_buf(),
                    reason: format!("empty word recorded for {}", date),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(NaiveDate, String)> for History {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, String)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(date, word)| (date_key(date), word))
                .collect(),
        }
    }
}

/// Loads and persists [`History`] at a fixed path.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    seed_path: PathBuf,
}

impl HistoryStore {
    /// Store at `path`, bootstrapping from `<path>.seed` when the file is absent.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut seed_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        seed_name.push(".");
        seed_name.push(SEED_SUFFIX);
        let seed_path = path.with_file_name(seed_name);
        Self { path, seed_path }
    }

    /// Overrides the seed snapshot location.
    pub fn with_seed_path(mut self, seed_path: impl Into<PathBuf>) -> Self {
        self.seed_path = seed_path.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn seed_path(&self) -> &Path {
        &self.seed_path
    }

    /// Reads the persisted history.
    ///
    /// A missing file is a valid state: the seed snapshot is copied into place if one
    /// exists, otherwise the history starts empty. A malformed file is fatal.
    pub fn load(&self) -> HistoryResult<History> {
        if self.path.exists() {
            let history = Self::read(&self.path)?;
            debug!(path = %self.path.display(), entries = history.len(), "History loaded");
            return Ok(history);
        }

        if self.seed_path.exists() {
            warn!(
                path = %self.path.display(),
                seed = %self.seed_path.display(),
                "History file not found, bootstrapping from seed"
            );
            let history = Self::read(&self.seed_path)?;
            self.persist(&history)?;
            return Ok(history);
        }

        info!(path = %self.path.display(), "No history file found, starting empty");
        Ok(History::new())
    }

    /// Sets `history[date] = word` and rewrites the whole file atomically.
    pub fn record(&self, history: &mut History, date: NaiveDate, word: &str) -> HistoryResult<()> {
        if let Some(previous) = history.insert(date, word)
            && previous != word
        {
            warn!(date = %date, previous = %previous, word = %word, "Overwriting recorded daily word");
        }

        self.persist(history)?;
        info!(date = %date, word = %word, entries = history.len(), "History updated");
        Ok(())
    }

    fn persist(&self, history: &History) -> HistoryResult<()> {
        let mut bytes = serde_json::to_vec_pretty(history)?;
        bytes.push(b'\n');
        atomic_write(&self.path, &bytes)?;
        Ok(())
    }

    fn read(path: &Path) -> HistoryResult<History> {
        let contents = fs::read_to_string(path).map_err(|source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let history: History =
            serde_json::from_str(&contents).map_err(|e| HistoryError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        history.validate(path)?;
        Ok(history)
    }
}
