//! Process-wide snapshot cache with per-path load gates.

use dashmap::DashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use driftline_core::Result;

use crate::snapshot::IndexSnapshot;

/// Caches one loaded [`IndexSnapshot`] per backing path.
///
/// Concurrent callers that observe an empty cache race to a path-scoped
/// gate; exactly one performs the load, the rest wait and reuse the
/// result. The gate is scoped to the path, so loads of unrelated indexes
/// never block each other.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    loaded: DashMap<PathBuf, Arc<IndexSnapshot>>,
    gates: DashMap<PathBuf, Arc<Mutex<()>>>,
}

impl SnapshotCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached snapshot for a path, if one was loaded.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<Arc<IndexSnapshot>> {
        self.loaded.get(path).map(|entry| Arc::clone(&entry))
    }

    /// Returns the cached snapshot, loading it at most once per path.
    pub async fn get_or_load<F, Fut>(&self, path: &Path, load: F) -> Result<Arc<IndexSnapshot>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<IndexSnapshot>>,
    {
        if let Some(found) = self.get(path) {
            return Ok(found);
        }

        let gate = Arc::clone(
            &self
                .gates
                .entry(path.to_path_buf())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        );
        let _held = gate.lock().await;

        // Another caller may have finished the load while we waited.
        if let Some(found) = self.get(path) {
            return Ok(found);
        }

        let snapshot = Arc::new(load().await?);
        self.loaded.insert(path.to_path_buf(), Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Replaces the cached snapshot for a path with a fully-built one.
    pub fn replace(&self, path: &Path, snapshot: Arc<IndexSnapshot>) {
        self.loaded.insert(path.to_path_buf(), snapshot);
    }
}
