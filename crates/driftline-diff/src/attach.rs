//! Placement of detected changes into the drift report.
//!
//! One generic routine decides where a change lands; every entity kind
//! and the mapping drift go through it with their own small accessor and
//! merge closures. The precedence, first match wins:
//!
//! 1. owning library classified newly-added: the change joins that
//!    library's record under `added_libraries`, in the added slot;
//! 2. owning library classified deleted: `deleted_libraries`, removed slot;
//! 3. an existing modified-library record already holds the entity in a
//!    slot: merge there;
//! 4. otherwise a modified-library record is created (at most once per
//!    library) and the change attached fresh.

use uuid::Uuid;

use driftline_core::{
    ComponentType, DriftError, Identified, LibraryId, PropertyType, Result,
};
use driftline_index::IdentityIndex;

use crate::aggregate::MappingDrift;
use crate::delta::{EntityChange, EntityDelta};
use crate::report::{DriftReport, LibraryDrift};

/// How a library was classified by the (external) change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryClass {
    /// Present only on the after side.
    Added,
    /// Present only on the before side.
    Deleted,
    /// Pre-existing; changes are diffed individually.
    Existing,
}

/// Externally supplied classification of every library touched by a run.
#[derive(Debug, Clone, Default)]
pub struct LibraryClassification {
    added: std::collections::BTreeSet<LibraryId>,
    deleted: std::collections::BTreeSet<LibraryId>,
}

impl LibraryClassification {
    /// Creates a classification where every library is pre-existing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a library as newly added.
    pub fn mark_added(&mut self, library_id: LibraryId) {
        self.added.insert(library_id);
    }

    /// Marks a library as deleted.
    pub fn mark_deleted(&mut self, library_id: LibraryId) {
        self.deleted.insert(library_id);
    }

    /// Classifies one library.
    #[must_use]
    pub fn classify(&self, library_id: LibraryId) -> LibraryClass {
        if self.added.contains(&library_id) {
            LibraryClass::Added
        } else if self.deleted.contains(&library_id) {
            LibraryClass::Deleted
        } else {
            LibraryClass::Existing
        }
    }
}

/// One change ready for placement.
#[derive(Debug, Clone)]
pub enum EntityPlacement<T> {
    Added(T),
    Removed(T),
    Modified(EntityChange<T>),
}

impl<T: Identified> EntityPlacement<T> {
    fn entity_id(&self) -> Uuid {
        match self {
            EntityPlacement::Added(entity) | EntityPlacement::Removed(entity) => {
                entity.entity_id()
            }
            EntityPlacement::Modified(change) => change.after.entity_id(),
        }
    }
}

/// The single reusable placement routine.
///
/// Picks the bucket list from the library's classification, finds or
/// creates the library record (at most one per library per bucket), and
/// hands it to the caller's merge step together with the classification.
pub fn place<C>(
    report: &mut DriftReport,
    classification: &LibraryClassification,
    library_id: LibraryId,
    change: C,
    merge: impl FnOnce(&mut LibraryDrift, LibraryClass, C),
) {
    let class = classification.classify(library_id);
    let bucket = match class {
        LibraryClass::Added => &mut report.added_libraries,
        LibraryClass::Deleted => &mut report.deleted_libraries,
        LibraryClass::Existing => &mut report.modified_libraries,
    };
    let record = find_or_create(bucket, library_id);
    merge(record, class, change);
}

fn find_or_create(bucket: &mut Vec<LibraryDrift>, library_id: LibraryId) -> &mut LibraryDrift {
    let position = match bucket.iter().position(|r| r.library_id == library_id) {
        Some(position) => position,
        None => {
            bucket.push(LibraryDrift::new(library_id));
            bucket.len() - 1
        }
    };
    &mut bucket[position]
}

/// Attaches one entity kind's delta under its owning library.
///
/// For a newly-added library everything lands as added (the whole library
/// is new, no further diff is kept); for a deleted library everything
/// lands as removed. For a pre-existing library each change merges into
/// the slot that already holds the entity, or its own disposition slot.
pub fn attach_entities<T>(
    report: &mut DriftReport,
    classification: &LibraryClassification,
    library_id: LibraryId,
    delta: EntityDelta<T>,
    slot: fn(&mut LibraryDrift) -> &mut EntityDelta<T>,
) where
    T: Identified + Clone,
{
    if delta.is_empty() {
        return;
    }

    place(
        report,
        classification,
        library_id,
        delta,
        |record, class, delta| {
            let slot = slot(record);
            match class {
                LibraryClass::Added => {
                    for entity in delta.added {
                        merge_entity(slot, EntityPlacement::Added(entity));
                    }
                    for change in delta.modified {
                        merge_entity(slot, EntityPlacement::Added(change.after));
                    }
                }
                LibraryClass::Deleted => {
                    for entity in delta.removed {
                        merge_entity(slot, EntityPlacement::Removed(entity));
                    }
                    for change in delta.modified {
                        merge_entity(slot, EntityPlacement::Removed(change.before));
                    }
                }
                LibraryClass::Existing => {
                    for entity in delta.added {
                        merge_entity(slot, EntityPlacement::Added(entity));
                    }
                    for entity in delta.removed {
                        merge_entity(slot, EntityPlacement::Removed(entity));
                    }
                    for change in delta.modified {
                        merge_entity(slot, EntityPlacement::Modified(change));
                    }
                }
            }
        },
    );
}

/// Merges one placement into a slot, preferring the slot that already
/// holds the entity.
fn merge_entity<T: Identified + Clone>(slot: &mut EntityDelta<T>, placement: EntityPlacement<T>) {
    let id = placement.entity_id();

    if let Some(existing) = slot.added.iter_mut().find(|e| e.entity_id() == id) {
        *existing = into_entity(placement);
        return;
    }
    if let Some(existing) = slot.removed.iter_mut().find(|e| e.entity_id() == id) {
        *existing = into_entity(placement);
        return;
    }
    if let Some(existing) = slot
        .modified
        .iter_mut()
        .find(|c| c.after.entity_id() == id)
    {
        match placement {
            EntityPlacement::Modified(change) => *existing = change,
            EntityPlacement::Added(entity) | EntityPlacement::Removed(entity) => {
                existing.after = entity;
            }
        }
        return;
    }

    match placement {
        EntityPlacement::Added(entity) => slot.added.push(entity),
        EntityPlacement::Removed(entity) => slot.removed.push(entity),
        EntityPlacement::Modified(change) => slot.modified.push(change),
    }
}

fn into_entity<T>(placement: EntityPlacement<T>) -> T {
    match placement {
        EntityPlacement::Added(entity) | EntityPlacement::Removed(entity) => entity,
        EntityPlacement::Modified(change) => change.after,
    }
}

/// Attaches mapping drift under each component's owning library.
///
/// The owning library is resolved by scanning the candidate libraries'
/// component sets in the identity index. A component no candidate library
/// owns is a hard error: silently attaching to a blank library would hide
/// a broken mapping.
pub async fn attach_mappings(
    report: &mut DriftReport,
    classification: &LibraryClassification,
    index: &IdentityIndex,
    candidate_libraries: &[LibraryId],
    drifts: Vec<MappingDrift>,
) -> Result<()> {
    for drift in drifts {
        let library_id = owning_library(index, candidate_libraries, &drift).await?;
        place(
            report,
            classification,
            library_id,
            drift,
            |record, _class, drift| {
                if let Some(existing) = record
                    .mappings
                    .iter_mut()
                    .find(|m| m.component_id == drift.component_id)
                {
                    *existing = drift;
                } else {
                    record.mappings.push(drift);
                    record
                        .mappings
                        .sort_by_key(|m| (m.component_ref, m.component_id));
                }
            },
        );
    }
    Ok(())
}

async fn owning_library(
    index: &IdentityIndex,
    candidates: &[LibraryId],
    drift: &MappingDrift,
) -> Result<LibraryId> {
    for &library in candidates {
        if index
            .components_of(library)
            .await?
            .contains(&drift.component_id)
        {
            return Ok(library);
        }
    }
    Err(DriftError::not_found_id(
        "owning library for component",
        drift.component_id,
    ))
}

/// Attaches cross-library component-type drift to the global bucket.
pub fn attach_global_component_types(report: &mut DriftReport, delta: EntityDelta<ComponentType>) {
    merge_delta(&mut report.global.component_types, delta);
}

/// Attaches cross-library property-type drift to the global bucket.
pub fn attach_global_property_types(report: &mut DriftReport, delta: EntityDelta<PropertyType>) {
    merge_delta(&mut report.global.property_types, delta);
}

fn merge_delta<T: Identified + Clone>(slot: &mut EntityDelta<T>, delta: EntityDelta<T>) {
    for entity in delta.added {
        merge_entity(slot, EntityPlacement::Added(entity));
    }
    for entity in delta.removed {
        merge_entity(slot, EntityPlacement::Removed(entity));
    }
    for change in delta.modified {
        merge_entity(slot, EntityPlacement::Modified(change));
    }
}
