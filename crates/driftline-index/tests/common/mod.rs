//! In-memory collaborators for identity-index tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use driftline_core::{
    CatalogRepository, DriftError, EntityIdentifier, IndexStore, LibraryId, RawMappingRow, Result,
};

/// Repository over a fixed identifier list.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    pub identifiers: Vec<EntityIdentifier>,
}

impl MemoryRepository {
    pub fn new(identifiers: Vec<EntityIdentifier>) -> Self {
        Self { identifiers }
    }
}

#[async_trait]
impl CatalogRepository for MemoryRepository {
    async fn all_entity_identifiers(&self) -> Result<Vec<EntityIdentifier>> {
        Ok(self.identifiers.clone())
    }

    async fn entity_identifiers_by_libraries(
        &self,
        libraries: &[LibraryId],
    ) -> Result<Vec<EntityIdentifier>> {
        Ok(self
            .identifiers
            .iter()
            .filter(|identifier| {
                libraries
                    .iter()
                    .any(|library| *library.as_uuid() == identifier.collection_id)
            })
            .copied()
            .collect())
    }

    async fn requirement_mapping_rows(&self) -> Result<Vec<RawMappingRow>> {
        Ok(vec![])
    }

    async fn requirement_mapping_rows_by_libraries(
        &self,
        _libraries: &[LibraryId],
    ) -> Result<Vec<RawMappingRow>> {
        Ok(vec![])
    }

    async fn threat_mapping_rows(&self) -> Result<Vec<RawMappingRow>> {
        Ok(vec![])
    }

    async fn threat_mapping_rows_by_libraries(
        &self,
        _libraries: &[LibraryId],
    ) -> Result<Vec<RawMappingRow>> {
        Ok(vec![])
    }

    async fn property_mapping_rows(&self) -> Result<Vec<RawMappingRow>> {
        Ok(vec![])
    }

    async fn property_mapping_rows_by_libraries(
        &self,
        _libraries: &[LibraryId],
    ) -> Result<Vec<RawMappingRow>> {
        Ok(vec![])
    }
}

/// Byte storage over a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file, bypassing the atomic-write path.
    pub fn seed(&self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.files.lock().unwrap().insert(path.into(), bytes);
    }

    /// Raw contents of a stored file.
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

#[async_trait]
impl IndexStore for MemoryStore {
    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| DriftError::Storage {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            })
    }

    async fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}
