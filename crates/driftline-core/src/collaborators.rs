//! Trait boundaries for the out-of-scope collaborators.
//!
//! The reconciliation core never talks to a database, parses a declarative
//! file, or opens a file handle directly. It consumes these three traits;
//! production wiring supplies implementations backed by the relational
//! store, the file-tree parser, and the filesystem.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::entity::{
    Component, ComponentType, Library, Property, PropertyOption, PropertyType,
    SecurityRequirement, TestCase, Threat,
};
use crate::error::Result;
use crate::ids::LibraryId;
use crate::mapping::{EntityIdentifier, RawMappingRow};

/// The relational query layer.
///
/// Implementations return flat rows; all interpretation (sorting, compact-id
/// assignment, graph building) happens in this core.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Every durable identifier in the store.
    async fn all_entity_identifiers(&self) -> Result<Vec<EntityIdentifier>>;

    /// Durable identifiers owned by the given libraries, including the
    /// library rows themselves.
    async fn entity_identifiers_by_libraries(
        &self,
        libraries: &[LibraryId],
    ) -> Result<Vec<EntityIdentifier>>;

    /// All component-to-requirement relation rows.
    async fn requirement_mapping_rows(&self) -> Result<Vec<RawMappingRow>>;

    /// Component-to-requirement rows scoped to the given libraries.
    async fn requirement_mapping_rows_by_libraries(
        &self,
        libraries: &[LibraryId],
    ) -> Result<Vec<RawMappingRow>>;

    /// All component-to-threat(-to-requirement) relation rows.
    async fn threat_mapping_rows(&self) -> Result<Vec<RawMappingRow>>;

    /// Component-to-threat rows scoped to the given libraries.
    async fn threat_mapping_rows_by_libraries(
        &self,
        libraries: &[LibraryId],
    ) -> Result<Vec<RawMappingRow>>;

    /// All property-chain relation rows.
    async fn property_mapping_rows(&self) -> Result<Vec<RawMappingRow>>;

    /// Property-chain rows scoped to the given libraries.
    async fn property_mapping_rows_by_libraries(
        &self,
        libraries: &[LibraryId],
    ) -> Result<Vec<RawMappingRow>>;
}

/// The declarative-file parser.
///
/// Implementations read structured files into entity records, applying
/// defaults for absent optional fields. A single unparseable file is the
/// implementation's to log and skip; it must not fail the whole batch.
#[async_trait]
pub trait DeclarativeSource: Send + Sync {
    async fn read_libraries(&self, paths: &[PathBuf]) -> Result<Vec<Library>>;
    async fn read_components(&self, paths: &[PathBuf]) -> Result<Vec<Component>>;
    async fn read_threats(&self, paths: &[PathBuf]) -> Result<Vec<Threat>>;
    async fn read_requirements(&self, paths: &[PathBuf]) -> Result<Vec<SecurityRequirement>>;
    async fn read_properties(&self, paths: &[PathBuf]) -> Result<Vec<Property>>;
    async fn read_property_options(&self, paths: &[PathBuf]) -> Result<Vec<PropertyOption>>;
    async fn read_test_cases(&self, paths: &[PathBuf]) -> Result<Vec<TestCase>>;
    async fn read_component_types(&self, paths: &[PathBuf]) -> Result<Vec<ComponentType>>;
    async fn read_property_types(&self, paths: &[PathBuf]) -> Result<Vec<PropertyType>>;

    /// Raw relation rows declared in the file tree, per dimension.
    async fn read_requirement_mapping_rows(&self, paths: &[PathBuf])
        -> Result<Vec<RawMappingRow>>;
    async fn read_threat_mapping_rows(&self, paths: &[PathBuf]) -> Result<Vec<RawMappingRow>>;
    async fn read_property_mapping_rows(&self, paths: &[PathBuf]) -> Result<Vec<RawMappingRow>>;
}

/// Durable byte storage for the identity index.
///
/// `write_atomic` must have temp-file-plus-rename semantics: a reader never
/// observes a half-written file at the canonical path.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Reads the whole file.
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Replaces the file contents atomically.
    async fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<()>;

    /// Whether the file exists.
    async fn exists(&self, path: &Path) -> bool;
}
