//! In-memory collaborators for pipeline tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use driftline_core::{
    CatalogRepository, DriftError, EntityIdentifier, IndexStore, LibraryId, RawMappingRow, Result,
};
use driftline_index::{IdentityIndex, IndexConfig, SnapshotCache};

/// Repository over fixed identifier and row lists.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    pub identifiers: Vec<EntityIdentifier>,
    pub requirement_rows: Vec<RawMappingRow>,
    pub threat_rows: Vec<RawMappingRow>,
    pub property_rows: Vec<RawMappingRow>,
}

impl MemoryRepository {
    pub fn new(identifiers: Vec<EntityIdentifier>) -> Self {
        Self {
            identifiers,
            ..Default::default()
        }
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
        Ok(self.requirement_rows.clone())
    }

    async fn requirement_mapping_rows_by_libraries(
        &self,
        _libraries: &[LibraryId],
    ) -> Result<Vec<RawMappingRow>> {
        Ok(self.requirement_rows.clone())
    }

    async fn threat_mapping_rows(&self) -> Result<Vec<RawMappingRow>> {
        Ok(self.threat_rows.clone())
    }

    async fn threat_mapping_rows_by_libraries(
        &self,
        _libraries: &[LibraryId],
    ) -> Result<Vec<RawMappingRow>> {
        Ok(self.threat_rows.clone())
    }

    async fn property_mapping_rows(&self) -> Result<Vec<RawMappingRow>> {
        Ok(self.property_rows.clone())
    }

    async fn property_mapping_rows_by_libraries(
        &self,
        _libraries: &[LibraryId],
    ) -> Result<Vec<RawMappingRow>> {
        Ok(self.property_rows.clone())
    }
}

/// Byte storage over a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
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

/// Builds an identity index over the given identifiers.
pub fn index_over(identifiers: Vec<EntityIdentifier>) -> IdentityIndex {
    IdentityIndex::new(
        Arc::new(MemoryRepository::new(identifiers)),
        Arc::new(MemoryStore::default()),
        Arc::new(SnapshotCache::new()),
        IndexConfig::new("catalog/index.json").unwrap(),
    )
}
