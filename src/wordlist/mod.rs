//! Candidate word pool.
//!
//! The list arrives pre-filtered (one lowercase word per line). Loading only trims,
//! skips blank lines and drops repeats, keeping the first occurrence so that
//! wordlist order, which breaks similarity ties, stays meaningful.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum WordlistError {
    #[error("wordlist not found at path: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read wordlist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ordered, de-duplicated candidate words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wordlist {
    words: Vec<String>,
}

impl Wordlist {
    /// Builds a wordlist from raw entries.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut duplicates = 0usize;

        for raw in words {
            let word = raw.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            if seen.insert(word.to_string()) {
                kept.push(word.to_string());
            } else {
                duplicates += 1;
            }
        }

        if duplicates > 0 {
            debug!(duplicates, "Dropped repeated wordlist entries");
        }

        Self { words: kept }
    }

    /// Reads a wordlist file, one word per line.
    pub fn load(path: &Path) -> Result<Self, WordlistError> {
        if !path.exists() {
            return Err(WordlistError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = fs::read_to_string(path).map_err(|source| WordlistError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let wordlist = Self::from_words(contents.lines());
        info!(path = %path.display(), words = wordlist.len(), "Wordlist loaded");
        Ok(wordlist)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }
}

impl<'a> IntoIterator for &'a Wordlist {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
