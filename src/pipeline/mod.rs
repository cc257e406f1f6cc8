//! Daily generation: select → record → rank → write.
//!
//! History is loaded, consulted and (for a new date) persisted before ranking starts,
//! so a later invocation for the same date takes the recorded word. If the process
//! dies between recording and writing the snapshot, the next run finds the date in
//! history and simply recomputes the snapshot.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::{PipelineError, PipelineResult};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::history::{HistoryStore, date_key};
use crate::oracle::VectorOracle;
use crate::ranking::{RankerConfig, RankingError, RankingStats, SimilarityRanker, normalize_scores};
use crate::selector::{DailyWordSelector, SelectionOrigin};
use crate::snapshot::{DailySnapshot, write_snapshot};
use crate::wordlist::Wordlist;

/// File locations and ranking parameters for one pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub wordlist_path: PathBuf,
    pub history_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub ranker: RankerConfig,
    /// Adds the min–max `score` field to every record.
    pub normalize: bool,
}

impl PipelineConfig {
    pub fn new(
        wordlist_path: impl Into<PathBuf>,
        history_path: impl Into<PathBuf>,
        snapshot_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            wordlist_path: wordlist_path.into(),
            history_path: history_path.into(),
            snapshot_path: snapshot_path.into(),
            ranker: RankerConfig::default(),
            normalize: false,
        }
    }

    pub fn with_ranker(mut self, ranker: RankerConfig) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self::new(
            config.wordlist_path(),
            config.history_path(),
            config.snapshot_path(),
        )
        .with_ranker(RankerConfig::new(config.min_similarity, config.top_k))
        .with_normalize(config.normalize)
    }
}

/// Outcome of one [`DailyPipeline::run`].
#[derive(Debug, Clone)]
pub struct Generation {
    pub snapshot: DailySnapshot,
    pub origin: SelectionOrigin,
    pub stats: RankingStats,
}

impl Generation {
    /// `true` if this run drew and recorded a new word.
    pub fn is_fresh(&self) -> bool {
        self.origin.is_fresh()
    }
}

pub struct DailyPipeline {
    config: PipelineConfig,
    history: HistoryStore,
    selector: DailyWordSelector,
    ranker: SimilarityRanker,
    oracle: Arc<dyn VectorOracle>,
}

impl std::fmt::Debug for DailyPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyPipeline")
            .field("config", &self.config)
            .field("oracle", &self.oracle.describe())
            .finish()
    }
}

impl DailyPipeline {
    pub fn new(config: PipelineConfig, oracle: Arc<dyn VectorOracle>) -> Result<Self, RankingError> {
        let ranker = SimilarityRanker::new(config.ranker)?;
        let history = HistoryStore::new(config.history_path.clone());
        Ok(Self {
            config,
            history,
            selector: DailyWordSelector::new(),
            ranker,
            oracle,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.config.snapshot_path
    }

    pub fn history_store(&self) -> &HistoryStore {
        &self.history
    }

    pub fn oracle_kind(&self) -> &'static str {
        self.oracle.describe()
    }

    /// Produces (or reproduces) the snapshot for `date` and writes it.
    #[instrument(skip(self), fields(date = %date))]
    pub fn run(&self, date: NaiveDate) -> PipelineResult<Generation> {
        let key = date_key(date);
        let wordlist = Wordlist::load(&self.config.wordlist_path)?;

        let mut history = self.history.load().map_err(|source| PipelineError::History {
            date: key.clone(),
            source,
        })?;

        let selection = self.selector.select(&wordlist, &history, date)?;

        if selection.is_fresh() {
            self.history
                .record(&mut history, date, &selection.word)
                .map_err(|source| PipelineError::History {
                    date: key.clone(),
                    source,
                })?;
        } else {
            debug!(word = %selection.word, "Reusing recorded daily word");
        }

        let ranking = self
            .ranker
            .rank(&selection.word, &wordlist, self.oracle.as_ref())
            .map_err(|source| PipelineError::Ranking {
                date: key.clone(),
                word: selection.word.clone(),
                source,
            })?;

        let stats = ranking.stats;
        let mut similarities = ranking.into_records();
        if self.config.normalize {
            normalize_scores(&mut similarities);
        }

        let snapshot = DailySnapshot::new(key.clone(), selection.word, similarities);
        write_snapshot(&self.config.snapshot_path, &snapshot).map_err(|source| {
            PipelineError::Snapshot {
                date: key.clone(),
                source,
            }
        })?;

        info!(
            word = %snapshot.word,
            origin = selection.origin.debug_status(),
            similarities = snapshot.len(),
            "Daily generation complete"
        );

        Ok(Generation {
            snapshot,
            origin: selection.origin,
            stats,
        })
    }
}
