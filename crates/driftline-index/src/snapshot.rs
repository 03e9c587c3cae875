//! In-memory projection of the persisted index.

use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use driftline_core::{CompactId, EntityKind};

use crate::entry::IndexEntry;

/// What the snapshot knows about one indexed identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedEntity {
    /// Assigned compact id.
    pub compact_id: CompactId,
    /// Owning collection.
    pub collection_id: Uuid,
    /// Entity kind.
    pub kind: EntityKind,
}

/// Read-only projection of a full entry list.
///
/// Rebuilt wholesale on generate/refresh; never mutated field by field.
/// Lookups that miss here fall through to the dynamic assignments.
#[derive(Debug, Default)]
pub struct IndexSnapshot {
    ids: HashMap<Uuid, IndexedEntity>,
    collections: HashMap<(Uuid, EntityKind), BTreeSet<Uuid>>,
    reverse: HashMap<CompactId, Uuid>,
    max_compact_id: u32,
}

impl IndexSnapshot {
    /// Builds the projections from a validated entry list.
    #[must_use]
    pub fn from_entries(entries: &[IndexEntry]) -> Self {
        let mut snapshot = IndexSnapshot::default();
        for entry in entries {
            snapshot.ids.insert(
                entry.id,
                IndexedEntity {
                    compact_id: entry.compact_id,
                    collection_id: entry.collection_id,
                    kind: entry.kind,
                },
            );
            snapshot
                .collections
                .entry((entry.collection_id, entry.kind))
                .or_default()
                .insert(entry.id);
            snapshot.reverse.insert(entry.compact_id, entry.id);
            snapshot.max_compact_id = snapshot.max_compact_id.max(entry.compact_id.get());
        }
        snapshot
    }

    /// The compact id for a durable identifier, if indexed.
    #[must_use]
    pub fn compact_id(&self, id: Uuid) -> Option<CompactId> {
        self.ids.get(&id).map(|entity| entity.compact_id)
    }

    /// Kind-checked variant of [`IndexSnapshot::compact_id`].
    #[must_use]
    pub fn compact_id_of(&self, kind: EntityKind, id: Uuid) -> Option<CompactId> {
        self.ids
            .get(&id)
            .filter(|entity| entity.kind == kind)
            .map(|entity| entity.compact_id)
    }

    /// Full record for a durable identifier, if indexed.
    #[must_use]
    pub fn entity(&self, id: Uuid) -> Option<&IndexedEntity> {
        self.ids.get(&id)
    }

    /// The durable identifier behind a compact id, if indexed.
    #[must_use]
    pub fn id_for(&self, compact_id: CompactId) -> Option<Uuid> {
        self.reverse.get(&compact_id).copied()
    }

    /// Identifiers of the given kind owned by the given collection.
    #[must_use]
    pub fn ids_for(&self, collection_id: Uuid, kind: EntityKind) -> BTreeSet<Uuid> {
        self.collections
            .get(&(collection_id, kind))
            .cloned()
            .unwrap_or_default()
    }

    /// The highest compact id in the snapshot; 0 when empty.
    #[must_use]
    pub fn max_compact_id(&self) -> u32 {
        self.max_compact_id
    }

    /// Number of indexed identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftline_core::CompactId;

    fn entries() -> Vec<IndexEntry> {
        let library = Uuid::from_u128(900);
        vec![
            IndexEntry {
                id: Uuid::from_u128(1),
                compact_id: CompactId::new(1),
                collection_id: library,
                kind: EntityKind::Component,
            },
            IndexEntry {
                id: Uuid::from_u128(2),
                compact_id: CompactId::new(2),
                collection_id: library,
                kind: EntityKind::Component,
            },
            IndexEntry {
                id: Uuid::from_u128(3),
                compact_id: CompactId::new(7),
                collection_id: library,
                kind: EntityKind::Threat,
            },
        ]
    }

    #[test]
    fn forward_lookup() {
        let snapshot = IndexSnapshot::from_entries(&entries());
        assert_eq!(
            snapshot.compact_id(Uuid::from_u128(1)),
            Some(CompactId::new(1))
        );
        assert_eq!(snapshot.compact_id(Uuid::from_u128(99)), None);
    }

    #[test]
    fn kind_checked_lookup() {
        let snapshot = IndexSnapshot::from_entries(&entries());
        assert_eq!(
            snapshot.compact_id_of(EntityKind::Threat, Uuid::from_u128(3)),
            Some(CompactId::new(7))
        );
        assert_eq!(
            snapshot.compact_id_of(EntityKind::Component, Uuid::from_u128(3)),
            None
        );
    }

    #[test]
    fn reverse_lookup() {
        let snapshot = IndexSnapshot::from_entries(&entries());
        assert_eq!(snapshot.id_for(CompactId::new(7)), Some(Uuid::from_u128(3)));
        assert_eq!(snapshot.id_for(CompactId::new(8)), None);
    }

    #[test]
    fn collection_projection_groups_by_kind() {
        let snapshot = IndexSnapshot::from_entries(&entries());
        let library = Uuid::from_u128(900);
        let components = snapshot.ids_for(library, EntityKind::Component);
        assert_eq!(components.len(), 2);
        assert!(components.contains(&Uuid::from_u128(1)));
        let threats = snapshot.ids_for(library, EntityKind::Threat);
        assert_eq!(threats.len(), 1);
        assert!(snapshot.ids_for(library, EntityKind::Property).is_empty());
    }

    #[test]
    fn max_compact_id_tracks_the_highest_entry() {
        let snapshot = IndexSnapshot::from_entries(&entries());
        assert_eq!(snapshot.max_compact_id(), 7);
        assert_eq!(IndexSnapshot::default().max_compact_id(), 0);
    }
}
