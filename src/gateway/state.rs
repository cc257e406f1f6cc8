use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::gateway::auth::GenerateGate;
use crate::pipeline::DailyPipeline;
use crate::snapshot::{DailySnapshot, SnapshotError, read_snapshot};

/// In-memory copy of the snapshot file, reloaded when the file's mtime changes.
///
/// The generator may run out of process (scheduler invoking the CLI), so the file
/// stays authoritative.
#[derive(Debug)]
pub struct SnapshotCache {
    path: PathBuf,
    entry: RwLock<Option<CachedSnapshot>>,
}

#[derive(Debug, Clone)]
struct CachedSnapshot {
    modified: Option<SystemTime>,
    snapshot: Arc<DailySnapshot>,
}

impl SnapshotCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entry: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current snapshot, or `None` if none has been written yet.
    ///
    /// Blocking: call from `spawn_blocking` in async contexts.
    pub fn current(&self) -> Result<Option<Arc<DailySnapshot>>, SnapshotError> {
        let modified = match fs::metadata(&self.path) {
            Ok(meta) => meta.modified().ok(),
            Err(_) => {
                *self.entry.write() = None;
                return Ok(None);
            }
        };

        if let Some(cached) = self.entry.read().as_ref()
            && cached.modified.is_some()
            && cached.modified == modified
        {
            return Ok(Some(Arc::clone(&cached.snapshot)));
        }

        match read_snapshot(&self.path) {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                debug!(date = %snapshot.date, "Snapshot cache refreshed from disk");
                *self.entry.write() = Some(CachedSnapshot {
                    modified,
                    snapshot: Arc::clone(&snapshot),
                });
                Ok(Some(snapshot))
            }
            Err(SnapshotError::NotFound { .. }) => Ok(None),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Snapshot unreadable");
                Err(e)
            }
        }
    }

    /// Installs a freshly generated snapshot.
    pub fn replace(&self, snapshot: DailySnapshot) -> Arc<DailySnapshot> {
        let modified = fs::metadata(&self.path)
            .ok()
            .and_then(|meta| meta.modified().ok());
        let snapshot = Arc::new(snapshot);
        *self.entry.write() = Some(CachedSnapshot {
            modified,
            snapshot: Arc::clone(&snapshot),
        });
        snapshot
    }
}

#[derive(Clone)]
pub struct GatewayState {
    pub pipeline: Arc<DailyPipeline>,

    pub snapshots: Arc<SnapshotCache>,

    pub gate: Arc<GenerateGate>,
}

impl GatewayState {
    pub fn new(pipeline: Arc<DailyPipeline>, gate: GenerateGate) -> Self {
        let snapshots = Arc::new(SnapshotCache::new(pipeline.snapshot_path()));
        Self {
            pipeline,
            snapshots,
            gate: Arc::new(gate),
        }
    }
}
