//! In-memory dataset cache keyed by file modification time.
//!
//! Every [`DatasetCache::get`] stats the backing file and re-parses it
//! only when the timestamp moved. The mutex serializes the
//! check-and-refresh sequence, so concurrent requests during a refresh
//! wait for one parse instead of racing to duplicate it. A failed
//! refresh reports the error and leaves the previous snapshot in place.

use crate::dataset::load_releases;
use crate::error::{DatasetError, DatasetResult};
use crate::models::Release;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

/// Mtime-keyed cache of the parsed release dataset.
pub struct DatasetCache {
    path: PathBuf,
    inner: Mutex<Option<Snapshot>>,
}

struct Snapshot {
    records: Arc<Vec<Release>>,
    modified: SystemTime,
}

impl DatasetCache {
    /// Create a cache for the given dataset file. Nothing is read until
    /// the first [`DatasetCache::get`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: Mutex::new(None),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the current dataset, re-parsing the file if it changed.
    pub fn get(&self) -> DatasetResult<Arc<Vec<Release>>> {
        let modified = std::fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .map_err(|e| DatasetError::unavailable(&self.path, &e))?;

        // The slot only ever holds complete snapshots, so a poisoned
        // lock is still safe to read through.
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(snapshot) = guard.as_ref() {
            if snapshot.modified == modified {
                return Ok(snapshot.records.clone());
            }
        }

        let records = Arc::new(load_releases(&self.path)?);
        tracing::info!(
            path = %self.path.display(),
            records = records.len(),
            "dataset loaded"
        );

        *guard = Some(Snapshot {
            records: records.clone(),
            modified,
        });

        Ok(records)
    }
}
