//! The closed set of entity kinds handled by the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Entity kind discriminator used by the identity index.
///
/// The wire form (index file, serialized reports) is the kebab-case name,
/// e.g. `security-requirement`. Parsing an unknown kind is an error; a kind
/// value this enum does not know about means the input was produced by an
/// incompatible writer and the whole load must abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    /// A versioned content library, the owning collection for scoped kinds.
    Library,
    /// A modeled system component.
    Component,
    /// Cross-library component classification.
    ComponentType,
    /// A threat.
    Threat,
    /// A verification test case.
    TestCase,
    /// A security requirement.
    SecurityRequirement,
    /// A property attached to components.
    Property,
    /// Cross-library property classification.
    PropertyType,
    /// A selectable option of a property.
    PropertyOption,
}

/// Raised when a kind string is not part of the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity kind: {0}")]
pub struct UnknownEntityKind(pub String);

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Library,
        EntityKind::Component,
        EntityKind::ComponentType,
        EntityKind::Threat,
        EntityKind::TestCase,
        EntityKind::SecurityRequirement,
        EntityKind::Property,
        EntityKind::PropertyType,
        EntityKind::PropertyOption,
    ];

    /// The kebab-case wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Library => "library",
            EntityKind::Component => "component",
            EntityKind::ComponentType => "component-type",
            EntityKind::Threat => "threat",
            EntityKind::TestCase => "test-case",
            EntityKind::SecurityRequirement => "security-requirement",
            EntityKind::Property => "property",
            EntityKind::PropertyType => "property-type",
            EntityKind::PropertyOption => "property-option",
        }
    }

    /// Whether entities of this kind belong to a library.
    ///
    /// Cross-library kinds (and libraries themselves) own their index rows:
    /// their collection id is their own id.
    #[must_use]
    pub fn is_library_scoped(self) -> bool {
        !matches!(
            self,
            EntityKind::Library | EntityKind::ComponentType | EntityKind::PropertyType
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownEntityKind(s.to_string()))
    }
}
