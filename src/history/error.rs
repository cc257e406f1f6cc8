use std::path::PathBuf;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum HistoryError {
    /// The persisted file is not a valid date → word mapping. Never recovered.
    #[error("history at {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("failed to read history {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize history: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to persist history: {0}")]
    Storage(#[from] StorageError),
}

pub type HistoryResult<T> = Result<T, HistoryError>;
