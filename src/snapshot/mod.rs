//! Daily snapshot persistence.
//!
//! Each write fully replaces the destination; there is no merging with a previous
//! snapshot for the same date.

pub mod error;
pub mod types;


pub use error::{SnapshotError, SnapshotResult};
pub use types::{DailySnapshot, GuessOutcome, TopWord, normalize_guess};

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::storage::atomic_write;

/// Serializes `snapshot` to `destination`, overwriting unconditionally.
pub fn write_snapshot(destination: &Path, snapshot: &DailySnapshot) -> SnapshotResult<()> {
    let mut bytes = serde_json::to_vec_pretty(snapshot)?;
    bytes.push(b'\n');
    atomic_write(destination, &bytes)?;

    info!(
        path = %destination.display(),
        date = %snapshot.date,
        word = %snapshot.word,
        similarities = snapshot.len(),
        "Daily snapshot written"
    );
    Ok(())
}

/// Reads a snapshot previously written by [`write_snapshot`].
pub fn read_snapshot(path: &Path) -> SnapshotResult<DailySnapshot> {
    if !path.exists() {
        return Err(SnapshotError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let snapshot: DailySnapshot =
        serde_json::from_str(&contents).map_err(|e| SnapshotError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    debug!(path = %path.display(), date = %snapshot.date, "Daily snapshot read");
    Ok(snapshot)
}
