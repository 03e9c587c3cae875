//! Flat identity and relation rows exchanged with the relational collaborator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::{ComponentId, PropertyId, PropertyOptionId, RequirementId, ThreatId};
use crate::kind::EntityKind;

/// One durable identifier as listed by the relational collaborator.
///
/// `collection_id` is the owning collection: the owning library for
/// library-scoped kinds, the entity's own id for libraries and the
/// cross-library vocabulary kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityIdentifier {
    /// Durable 128-bit identifier.
    pub id: Uuid,
    /// Owning collection identifier.
    pub collection_id: Uuid,
    /// Entity kind.
    pub kind: EntityKind,
}

impl EntityIdentifier {
    /// Builds an identifier row.
    #[must_use]
    pub fn new(id: Uuid, collection_id: Uuid, kind: EntityKind) -> Self {
        Self {
            id,
            collection_id,
            kind,
        }
    }

    /// Builds a row for a self-owned entity (a library or a cross-library
    /// vocabulary kind).
    #[must_use]
    pub fn self_owned(id: Uuid, kind: EntityKind) -> Self {
        Self {
            id,
            collection_id: id,
            kind,
        }
    }
}

/// One flat relation tuple, with up to five optional foreign references.
///
/// A row usually populates only a subset of its dimensions: a plain
/// component-to-requirement mapping carries two, a fully qualified property
/// chain carries all five. Rows with no populated dimension at all are
/// discarded by the graph builders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMappingRow {
    #[serde(default)]
    pub component_id: Option<ComponentId>,
    #[serde(default)]
    pub property_id: Option<PropertyId>,
    #[serde(default)]
    pub option_id: Option<PropertyOptionId>,
    #[serde(default)]
    pub threat_id: Option<ThreatId>,
    #[serde(default)]
    pub requirement_id: Option<RequirementId>,
}

impl RawMappingRow {
    /// True when no dimension is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.component_id.is_none()
            && self.property_id.is_none()
            && self.option_id.is_none()
            && self.threat_id.is_none()
            && self.requirement_id.is_none()
    }
}
