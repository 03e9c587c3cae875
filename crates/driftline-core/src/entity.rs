//! Catalog entity records.
//!
//! These are the parsed shapes shared by both representations: the
//! relational collaborator and the declarative-file collaborator each
//! return them. Optional fields carry serde defaults so a merely-absent
//! field in a declarative file never fails a read.

use serde::{Deserialize, Serialize};

use crate::ids::{
    ComponentId, ComponentTypeId, LibraryId, PropertyId, PropertyOptionId, PropertyTypeId,
    RequirementId, TestCaseId, ThreatId,
};

/// A versioned, independently distributable bundle of content entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    /// Durable identifier.
    pub id: LibraryId,
    /// Canonical display name.
    pub name: String,
    /// Distribution version string.
    #[serde(default)]
    pub version: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// A modeled system component, the anchor of all relationship mappings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    /// Owning library.
    pub library_id: LibraryId,
    /// Canonical display name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Cross-library classification, when assigned.
    #[serde(default)]
    pub component_type: Option<ComponentTypeId>,
    /// Free-form labels; order and duplicates are not significant.
    #[serde(default)]
    pub labels: Vec<String>,
}

/// A threat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    pub id: ThreatId,
    pub library_id: LibraryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Relative severity ranking.
    #[serde(default)]
    pub severity: i64,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// A security requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityRequirement {
    pub id: RequirementId,
    pub library_id: LibraryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// A property attachable to components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub library_id: LibraryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Cross-library classification, when assigned.
    #[serde(default)]
    pub property_type: Option<PropertyTypeId>,
}

/// A selectable option of a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyOption {
    pub id: PropertyOptionId,
    pub library_id: LibraryId,
    /// The property this option belongs to.
    pub property_id: PropertyId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A verification test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: TestCaseId,
    pub library_id: LibraryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Cross-library component classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentType {
    pub id: ComponentTypeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Cross-library property classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyType {
    pub id: PropertyTypeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}
