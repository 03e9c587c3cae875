//! Filesystem-backed implementation of the durable storage boundary.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use driftline_core::{DriftError, IndexStore, Result};

/// Index storage on the local filesystem.
///
/// Writes go to a sibling temporary file first and are moved into place
/// with a rename, so a reader never observes a half-written index at the
/// canonical path.
#[derive(Debug, Default, Clone)]
pub struct FsIndexStore;

impl FsIndexStore {
    /// Creates the store.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }

    fn storage_error(path: &Path, source: std::io::Error) -> DriftError {
        DriftError::Storage {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[async_trait]
impl IndexStore for FsIndexStore {
    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|e| Self::storage_error(path, e))
    }

    async fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| Self::storage_error(path, e))?;
            }
        }

        let temp = Self::temp_path(path);
        tokio::fs::write(&temp, bytes)
            .await
            .map_err(|e| Self::storage_error(&temp, e))?;
        tokio::fs::rename(&temp, path)
            .await
            .map_err(|e| Self::storage_error(path, e))
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        let store = FsIndexStore::new();

        assert!(!store.exists(&path).await);
        store.write_atomic(&path, b"payload").await.unwrap();
        assert!(store.exists(&path).await);
        assert_eq!(store.read(&path).await.unwrap(), b"payload");
    }

    #[tokio::test]
    async fn write_replaces_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        let store = FsIndexStore::new();

        store.write_atomic(&path, b"first").await.unwrap();
        store.write_atomic(&path, b"second").await.unwrap();
        assert_eq!(store.read(&path).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn no_temp_file_remains_after_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        let store = FsIndexStore::new();

        store.write_atomic(&path, b"payload").await.unwrap();
        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["index.json".to_string()]);
    }

    #[tokio::test]
    async fn write_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/index.json");
        let store = FsIndexStore::new();

        store.write_atomic(&path, b"payload").await.unwrap();
        assert_eq!(store.read(&path).await.unwrap(), b"payload");
    }

    #[tokio::test]
    async fn read_missing_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let err = FsIndexStore::new().read(&path).await.unwrap_err();
        assert!(matches!(err, DriftError::Storage { .. }));
    }
}
