//! The identity index service.
//!
//! Owns the configured backing path, the process-wide snapshot cache and
//! the dynamic assignments, and talks to the relational and storage
//! collaborators through their traits.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

use driftline_core::{
    CatalogRepository, CompactId, ComponentId, DriftError, EntityIdentifier, EntityKind,
    IndexStore, LibraryId, PropertyId, PropertyOptionId, RequirementId, Result, TestCaseId,
    ThreatId,
};

use crate::cache::SnapshotCache;
use crate::dynamic::DynamicAssignments;
use crate::entry::{decode_entries, encode_entries, IndexEntry};
use crate::snapshot::IndexSnapshot;

/// Validated configuration for the identity index.
///
/// A missing path is a configuration error and is rejected here, at
/// construction, rather than surfacing later as a confusing I/O failure.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    path: std::path::PathBuf,
}

impl IndexConfig {
    /// Validates and wraps the backing file path.
    pub fn new(path: impl Into<std::path::PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(DriftError::Configuration {
                message: "identity index path is not set".to_string(),
            });
        }
        Ok(Self { path })
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Which identifiers a generation pass covers.
#[derive(Debug, Clone)]
pub enum GenerateScope {
    /// Every identifier in the store.
    AllEntities,
    /// Identifiers owned by the given libraries only.
    Libraries(Vec<LibraryId>),
}

/// Bidirectional lookup between durable identifiers and compact integers.
pub struct IdentityIndex {
    repository: Arc<dyn CatalogRepository>,
    store: Arc<dyn IndexStore>,
    cache: Arc<SnapshotCache>,
    config: IndexConfig,
    dynamic: OnceLock<DynamicAssignments>,
}

impl IdentityIndex {
    /// Creates the service around its collaborators.
    ///
    /// The cache is passed in explicitly so several services sharing a
    /// process share one cache and one load per path.
    #[must_use]
    pub fn new(
        repository: Arc<dyn CatalogRepository>,
        store: Arc<dyn IndexStore>,
        cache: Arc<SnapshotCache>,
        config: IndexConfig,
    ) -> Self {
        Self {
            repository,
            store,
            cache,
            config,
            dynamic: OnceLock::new(),
        }
    }

    /// The configured backing path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.config.path()
    }

    /// Regenerates the index from the relational store.
    ///
    /// Identifiers are sorted ascending and assigned compact ids 1..N, so
    /// two passes over the same identifier set produce identical files.
    /// The file is replaced atomically and the cached snapshot only after
    /// the full result is built.
    pub async fn generate(&self, scope: GenerateScope) -> Result<Arc<IndexSnapshot>> {
        let identifiers = match &scope {
            GenerateScope::AllEntities => self.repository.all_entity_identifiers().await?,
            GenerateScope::Libraries(libraries) => {
                self.repository
                    .entity_identifiers_by_libraries(libraries)
                    .await?
            }
        };

        let entries = assign_compact_ids(identifiers)?;
        let bytes = encode_entries(&entries)?;
        self.store.write_atomic(self.config.path(), &bytes).await?;

        let snapshot = Arc::new(IndexSnapshot::from_entries(&entries));
        self.cache
            .replace(self.config.path(), Arc::clone(&snapshot));
        if let Some(dynamic) = self.dynamic.get() {
            dynamic.raise_floor(snapshot.max_compact_id());
        }

        tracing::info!(
            path = %self.config.path().display(),
            entries = snapshot.len(),
            "regenerated identity index"
        );
        Ok(snapshot)
    }

    /// Reloads the snapshot from durable storage without regenerating.
    pub async fn refresh(&self) -> Result<Arc<IndexSnapshot>> {
        let snapshot = Arc::new(self.load_snapshot().await?);
        self.cache
            .replace(self.config.path(), Arc::clone(&snapshot));
        if let Some(dynamic) = self.dynamic.get() {
            dynamic.raise_floor(snapshot.max_compact_id());
        }

        tracing::info!(
            path = %self.config.path().display(),
            entries = snapshot.len(),
            "refreshed identity index"
        );
        Ok(snapshot)
    }

    /// The current snapshot, loading it from storage at most once.
    pub async fn snapshot(&self) -> Result<Arc<IndexSnapshot>> {
        self.cache
            .get_or_load(self.config.path(), || self.load_snapshot())
            .await
    }

    /// Resolves a durable identifier to its compact id.
    ///
    /// Identifiers absent from the snapshot get a process-lifetime dynamic
    /// assignment above the snapshot's high-water mark; re-resolving the
    /// same identifier returns the same value.
    pub async fn resolve(&self, id: Uuid) -> Result<CompactId> {
        let snapshot = self.snapshot().await?;
        if let Some(compact_id) = snapshot.compact_id(id) {
            return Ok(compact_id);
        }

        let dynamic = self.dynamics(&snapshot);
        if let Some(existing) = dynamic.get(id) {
            return Ok(existing);
        }
        let assigned = dynamic.resolve(id);
        tracing::debug!(%id, compact_id = %assigned, "dynamically assigned compact id");
        Ok(assigned)
    }

    /// Resolves a compact id back to its durable identifier.
    pub async fn resolve_reverse(&self, compact_id: CompactId) -> Result<Uuid> {
        let snapshot = self.snapshot().await?;
        if let Some(id) = snapshot.id_for(compact_id) {
            return Ok(id);
        }
        if let Some(dynamic) = self.dynamic.get() {
            if let Some(id) = dynamic.reverse(compact_id) {
                return Ok(id);
            }
        }
        Err(DriftError::not_found_id("compact id", compact_id))
    }

    /// Identifiers of a kind owned by a collection.
    pub async fn ids_for(&self, collection_id: Uuid, kind: EntityKind) -> Result<BTreeSet<Uuid>> {
        Ok(self.snapshot().await?.ids_for(collection_id, kind))
    }

    /// Components owned by a library.
    pub async fn components_of(&self, library: LibraryId) -> Result<BTreeSet<ComponentId>> {
        self.scoped(library, EntityKind::Component).await
    }

    /// Threats owned by a library.
    pub async fn threats_of(&self, library: LibraryId) -> Result<BTreeSet<ThreatId>> {
        self.scoped(library, EntityKind::Threat).await
    }

    /// Security requirements owned by a library.
    pub async fn requirements_of(&self, library: LibraryId) -> Result<BTreeSet<RequirementId>> {
        self.scoped(library, EntityKind::SecurityRequirement).await
    }

    /// Properties owned by a library.
    pub async fn properties_of(&self, library: LibraryId) -> Result<BTreeSet<PropertyId>> {
        self.scoped(library, EntityKind::Property).await
    }

    /// Property options owned by a library.
    pub async fn property_options_of(
        &self,
        library: LibraryId,
    ) -> Result<BTreeSet<PropertyOptionId>> {
        self.scoped(library, EntityKind::PropertyOption).await
    }

    /// Test cases owned by a library.
    pub async fn test_cases_of(&self, library: LibraryId) -> Result<BTreeSet<TestCaseId>> {
        self.scoped(library, EntityKind::TestCase).await
    }

    async fn scoped<T>(&self, library: LibraryId, kind: EntityKind) -> Result<BTreeSet<T>>
    where
        T: From<Uuid> + Ord,
    {
        Ok(self
            .ids_for(*library.as_uuid(), kind)
            .await?
            .into_iter()
            .map(T::from)
            .collect())
    }

    async fn load_snapshot(&self) -> Result<IndexSnapshot> {
        let path = self.config.path();
        if !self.store.exists(path).await {
            return Err(DriftError::not_found_id("index file", path.display()));
        }
        let bytes = self.store.read(path).await?;
        let entries = decode_entries(&bytes, path)?;
        Ok(IndexSnapshot::from_entries(&entries))
    }

    fn dynamics(&self, snapshot: &IndexSnapshot) -> &DynamicAssignments {
        self.dynamic
            .get_or_init(|| DynamicAssignments::new(snapshot.max_compact_id()))
    }
}

/// Sorts identifiers ascending and assigns compact ids 1..N.
fn assign_compact_ids(mut identifiers: Vec<EntityIdentifier>) -> Result<Vec<IndexEntry>> {
    identifiers.sort_by_key(|identifier| identifier.id);

    for pair in identifiers.windows(2) {
        if pair[0].id == pair[1].id {
            return Err(DriftError::InvalidFormat {
                context: "entity identifiers".to_string(),
                message: format!("duplicate identifier {}", pair[0].id),
            });
        }
    }

    Ok(identifiers
        .into_iter()
        .enumerate()
        .map(|(position, identifier)| IndexEntry {
            id: identifier.id,
            compact_id: CompactId::new(position as u32 + 1),
            collection_id: identifier.collection_id,
            kind: identifier.kind,
        })
        .collect())
}
