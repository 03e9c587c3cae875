//! # driftline-diff
//!
//! Drift computation for the catalog: the declarative field-difference
//! engine, the per-anchor mapping graphs and their symmetric difference,
//! entity-set deltas, the aggregation of edge-level diffs into
//! per-component mapping drift, and the placement of every detected
//! change into one hierarchical [`DriftReport`].
//!
//! Determinism is the governing constraint throughout: anchors iterate in
//! ascending order, edges carry a total order with populated optional
//! dimensions sorting before absent ones, and entity lists are ordered by
//! identifier. Running the same inputs twice produces identical reports.
//!
//! ```
//! use driftline_core::{Component, ComponentId, LibraryId};
//! use driftline_diff::compare;
//!
//! let before = Component {
//!     id: ComponentId::new(),
//!     library_id: LibraryId::new(),
//!     name: "Gateway".to_string(),
//!     description: String::new(),
//!     component_type: None,
//!     labels: vec!["edge".to_string()],
//! };
//! let mut after = before.clone();
//! after.name = "gateway".to_string(); // case-insensitive: not a change
//! after.labels = vec!["edge".to_string(), "net".to_string()];
//!
//! let changes = compare(&before, &after, &["name", "labels"]).unwrap();
//! assert_eq!(changes.len(), 1);
//! assert_eq!(changes[0].field, "labels");
//! ```

pub mod aggregate;
pub mod attach;
pub mod delta;
pub mod differ;
pub mod edge;
pub mod fields;
pub mod graph;
pub mod report;
mod tables;

pub use aggregate::{compose, EdgeDrift, MappingDrift};
pub use attach::{
    attach_entities, attach_global_component_types, attach_global_property_types,
    attach_mappings, place, EntityPlacement, LibraryClass, LibraryClassification,
};
pub use delta::{diff_entities, EntityChange, EntityDelta};
pub use differ::{diff_graphs, AnchorDiff};
pub use edge::{PropertyEdge, PropertyEdgeRef, SrEdge, SrEdgeRef, ThreatSrEdge, ThreatSrEdgeRef};
pub use fields::{compare, CompareMode, Diffable, FieldChange, FieldSpec, FieldValue};
pub use graph::{
    build_property_graph, build_requirement_graph, build_threat_graph, MappingGraph,
};
pub use report::{DriftReport, GlobalDrift, LibraryDrift};
