//! Crash-safe file replacement shared by the history and snapshot writers.
//!
//! Every persisted artifact is rewritten in full: bytes go to a sibling temp file,
//! are fsynced, then renamed over the destination, and the parent directory is
//! fsynced so the new entry survives a crash. Readers see either the old file or the
//! new one, never a truncated mix.

pub mod error;

pub use error::{StorageError, StorageResult};

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const TEMP_SUFFIX: &str = "tmp";

/// Returns the temp path used while `path` is being replaced.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}

/// Atomically replaces the contents of `path` with `bytes`, creating parent dirs as needed.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path);

    {
        let write_err = |source| StorageError::WriteFailed {
            path: temp_path.clone(),
            source,
        };
        let mut file = File::create(&temp_path).map_err(write_err)?;
        file.write_all(bytes).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
    }

    fs::rename(&temp_path, path).map_err(|source| StorageError::RenameFailed {
        path: path.to_path_buf(),
        source,
    })?;

    sync_parent_dir(path)
}

/// Flushes the directory holding `path`, making a completed rename durable.
///
/// A bare file name refers to the current directory.
pub fn sync_parent_dir(path: &Path) -> StorageResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => sync_dir(parent),
        _ => sync_dir(Path::new(".")),
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> StorageResult<()> {
    let sync_err = |source| StorageError::SyncDirFailed {
        path: dir.to_path_buf(),
        source,
    };
    File::open(dir).map_err(sync_err)?.sync_all().map_err(sync_err)
}

// No directory handle to sync on this platform.
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> StorageResult<()> {
    Ok(())
}
