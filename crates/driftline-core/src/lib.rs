//! # driftline-core
//!
//! Shared foundation of the driftline reconciliation engine: strongly typed
//! identifiers, the closed [`EntityKind`] enumeration, entity records, flat
//! identity/relation rows, the [`DriftError`] taxonomy, and the async trait
//! boundaries behind which the relational store, the declarative-file
//! parser and durable storage live.
//!
//! Nothing in this crate performs I/O; it is pure types and contracts.

pub mod collaborators;
pub mod entity;
pub mod error;
pub mod ids;
pub mod kind;
pub mod mapping;
pub mod traits;

pub use collaborators::{CatalogRepository, DeclarativeSource, IndexStore};
pub use entity::{
    Component, ComponentType, Library, Property, PropertyOption, PropertyType,
    SecurityRequirement, TestCase, Threat,
};
pub use error::{DriftError, Result};
pub use ids::{
    CompactId, ComponentId, ComponentTypeId, LibraryId, ParseIdError, PropertyId,
    PropertyOptionId, PropertyTypeId, RequirementId, TestCaseId, ThreatId,
};
pub use kind::{EntityKind, UnknownEntityKind};
pub use mapping::{EntityIdentifier, RawMappingRow};
pub use traits::{Identified, LibraryScoped};
