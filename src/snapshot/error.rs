use std::path::PathBuf;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot not found at {path}")]
    NotFound { path: PathBuf },

    #[error("snapshot at {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize snapshot: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to persist snapshot: {0}")]
    Storage(#[from] StorageError),
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;
