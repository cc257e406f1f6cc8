use thiserror::Error;

use crate::history::HistoryError;
use crate::ranking::RankingError;
use crate::selector::SelectionError;
use crate::snapshot::SnapshotError;
use crate::wordlist::WordlistError;

/// Single failure type surfaced to the invoking boundary (CLI or HTTP handler).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("wordlist unavailable: {0}")]
    Wordlist(#[from] WordlistError),

    #[error("history unavailable for {date}: {source}")]
    History {
        date: String,
        #[source]
        source: HistoryError,
    },

    #[error("daily word selection failed: {0}")]
    Selection(#[from] SelectionError),

    #[error("ranking '{word}' for {date} failed: {source}")]
    Ranking {
        date: String,
        word: String,
        #[source]
        source: RankingError,
    },

    #[error("writing snapshot for {date} failed: {source}")]
    Snapshot {
        date: String,
        #[source]
        source: SnapshotError,
    },
}

impl PipelineError {
    /// Short machine-readable category for logs and HTTP bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Wordlist(_) => "wordlist",
            PipelineError::History { .. } => "history",
            PipelineError::Selection(_) => "selection",
            PipelineError::Ranking { .. } => "ranking",
            PipelineError::Snapshot { .. } => "snapshot",
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
