//! Entity traits used by the drift pipeline.
//!
//! [`Identified`] gives every record a kind-erased durable id, which is what
//! the set-diff and placement stages key on. [`LibraryScoped`] marks records
//! that belong to a library; the cross-library vocabulary kinds do not
//! implement it.

use uuid::Uuid;

use crate::entity::{
    Component, ComponentType, Library, Property, PropertyOption, PropertyType,
    SecurityRequirement, TestCase, Threat,
};
use crate::ids::LibraryId;

/// An entity with a durable identifier.
///
/// Object-safe; the placement stage uses it through generics only.
pub trait Identified {
    /// Returns the kind-erased durable identifier.
    fn entity_id(&self) -> Uuid;
}

/// An entity owned by a library.
pub trait LibraryScoped {
    /// Returns the owning library.
    fn library_id(&self) -> LibraryId;
}

macro_rules! impl_identified {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Identified for $ty {
                fn entity_id(&self) -> Uuid {
                    (*self.id.as_uuid())
                }
            }
        )+
    };
}

impl_identified!(
    Library,
    Component,
    Threat,
    SecurityRequirement,
    Property,
    PropertyOption,
    TestCase,
    ComponentType,
    PropertyType,
);

macro_rules! impl_library_scoped {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl LibraryScoped for $ty {
                fn library_id(&self) -> LibraryId {
                    self.library_id
                }
            }
        )+
    };
}

impl_library_scoped!(
    Component,
    Threat,
    SecurityRequirement,
    Property,
    PropertyOption,
    TestCase,
);

impl LibraryScoped for Library {
    fn library_id(&self) -> LibraryId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ComponentId;

    #[test]
    fn identified_returns_the_entity_id() {
        let component = Component {
            id: ComponentId::new(),
            library_id: LibraryId::new(),
            name: "Gateway".to_string(),
            description: String::new(),
            component_type: None,
            labels: vec![],
        };
        assert_eq!(component.entity_id(), *component.id.as_uuid());
    }

    #[test]
    fn library_is_scoped_to_itself() {
        let library = Library {
            id: LibraryId::new(),
            name: "Base".to_string(),
            version: "1.0".to_string(),
            description: String::new(),
        };
        assert_eq!(library.library_id(), library.id);
    }
}
