//! The hierarchical drift report.
//!
//! One report is built per reconciliation run and serialized into
//! version-controlled artifacts, so every collection in it is kept in a
//! deterministic order by the stages that fill it. The report is plain
//! data: it has no locking of its own, and concurrent pipeline stages
//! must serialize their writes into it.

use serde::Serialize;

use driftline_core::{
    Component, ComponentType, LibraryId, Property, PropertyOption, PropertyType,
    SecurityRequirement, TestCase, Threat,
};

use crate::aggregate::MappingDrift;
use crate::delta::EntityDelta;

/// Drift of the cross-library vocabulary kinds.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GlobalDrift {
    pub component_types: EntityDelta<ComponentType>,
    pub property_types: EntityDelta<PropertyType>,
}

impl GlobalDrift {
    /// True when no vocabulary kind drifted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.component_types.is_empty() && self.property_types.is_empty()
    }
}

/// All drift detected within one library.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryDrift {
    pub library_id: LibraryId,
    pub components: EntityDelta<Component>,
    pub threats: EntityDelta<Threat>,
    pub requirements: EntityDelta<SecurityRequirement>,
    pub properties: EntityDelta<Property>,
    pub property_options: EntityDelta<PropertyOption>,
    pub test_cases: EntityDelta<TestCase>,
    /// Mapping drift per component, ordered by the component's compact id.
    pub mappings: Vec<MappingDrift>,
}

impl LibraryDrift {
    /// Creates an empty record for a library.
    #[must_use]
    pub fn new(library_id: LibraryId) -> Self {
        Self {
            library_id,
            components: EntityDelta::default(),
            threats: EntityDelta::default(),
            requirements: EntityDelta::default(),
            properties: EntityDelta::default(),
            property_options: EntityDelta::default(),
            test_cases: EntityDelta::default(),
            mappings: Vec::new(),
        }
    }

    /// True when the record carries no change at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
            && self.threats.is_empty()
            && self.requirements.is_empty()
            && self.properties.is_empty()
            && self.property_options.is_empty()
            && self.test_cases.is_empty()
            && self.mappings.is_empty()
    }

    /// Number of entity-level changes (mapping drift counts one per
    /// component).
    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.components.len()
            + self.threats.len()
            + self.requirements.len()
            + self.properties.len()
            + self.property_options.len()
            + self.test_cases.len()
            + self.mappings.len()
    }
}

/// Root of the drift report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DriftReport {
    /// Cross-library vocabulary drift.
    pub global: GlobalDrift,
    /// Libraries present only on the after side.
    pub added_libraries: Vec<LibraryDrift>,
    /// Libraries present only on the before side.
    pub deleted_libraries: Vec<LibraryDrift>,
    /// Pre-existing libraries with at least one change.
    pub modified_libraries: Vec<LibraryDrift>,
}

impl DriftReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the run detected no drift anywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global.is_empty()
            && self.added_libraries.is_empty()
            && self.deleted_libraries.is_empty()
            && self.modified_libraries.is_empty()
    }

    /// Total change count across all buckets.
    #[must_use]
    pub fn total_changes(&self) -> usize {
        let libraries = self
            .added_libraries
            .iter()
            .chain(&self.deleted_libraries)
            .chain(&self.modified_libraries)
            .map(LibraryDrift::total_changes)
            .sum::<usize>();
        libraries + self.global.component_types.len() + self.global.property_types.len()
    }
}
