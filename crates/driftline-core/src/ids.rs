//! Strongly typed entity identifiers.
//!
//! Every durable identifier in the catalog is a UUID wrapped in a newtype,
//! so a `ThreatId` can never be passed where a `ComponentId` is expected.
//! The compact integer side of the identity index gets its own newtype,
//! [`CompactId`].
//!
//! # Example
//!
//! ```
//! use driftline_core::{ComponentId, LibraryId};
//!
//! let library = LibraryId::new();
//! let component = ComponentId::new();
//!
//! fn owned_by(component: ComponentId, library: LibraryId) -> String {
//!     format!("{component} in {library}")
//! }
//!
//! let _ = owned_by(component, library);
//! // owned_by(library, component); // does not compile
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for identifier parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The identifier type that failed to parse.
    pub id_type: &'static str,
    /// The underlying UUID parse error message.
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Defines a strongly typed UUID identifier.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self).map_err(|e| ParseIdError {
                    id_type: stringify!($name),
                    message: e.to_string(),
                })
            }
        }
    };
}

define_id!(
    /// Identifier of a content library.
    ///
    /// A library is the owning collection for every library-scoped entity;
    /// a library's own identity-index row uses its id as its collection id.
    LibraryId
);

define_id!(
    /// Identifier of a component.
    ComponentId
);

define_id!(
    /// Identifier of a component type (cross-library vocabulary).
    ComponentTypeId
);

define_id!(
    /// Identifier of a threat.
    ThreatId
);

define_id!(
    /// Identifier of a test case.
    TestCaseId
);

define_id!(
    /// Identifier of a security requirement.
    RequirementId
);

define_id!(
    /// Identifier of a property.
    PropertyId
);

define_id!(
    /// Identifier of a property type (cross-library vocabulary).
    PropertyTypeId
);

define_id!(
    /// Identifier of a property option.
    PropertyOptionId
);

/// Compact sequential integer standing in for a durable identifier.
///
/// Compact ids are assigned by the identity index starting at 1; the value 0
/// never appears in a valid index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompactId(u32);

impl CompactId {
    /// Wraps a raw integer.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for CompactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CompactId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<CompactId> for u32 {
    fn from(id: CompactId) -> Self {
        id.0
    }
}
