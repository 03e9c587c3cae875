//! Per-anchor adjacency graphs built from flat relation rows.
//!
//! A graph covers exactly one relation dimension. Building is pure and
//! order-independent: rows group by their component reference and
//! structurally identical edges deduplicate into a set.

use std::collections::{BTreeMap, BTreeSet};

use driftline_core::{ComponentId, RawMappingRow};

use crate::edge::{PropertyEdge, SrEdge, ThreatSrEdge};

/// Adjacency sets for one relation dimension, keyed by anchor component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MappingGraph<E> {
    edges: BTreeMap<ComponentId, BTreeSet<E>>,
}

impl<E: Ord> MappingGraph<E> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            edges: BTreeMap::new(),
        }
    }

    /// Adds one edge under an anchor.
    pub fn insert(&mut self, anchor: ComponentId, edge: E) {
        self.edges.entry(anchor).or_default().insert(edge);
    }

    /// All anchors present, in ascending order.
    pub fn anchors(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.edges.keys().copied()
    }

    /// The edge set of an anchor, if present.
    #[must_use]
    pub fn edges(&self, anchor: ComponentId) -> Option<&BTreeSet<E>> {
        self.edges.get(&anchor)
    }

    /// Number of anchors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True when no anchor holds an edge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Builds the component-to-requirement graph.
///
/// A row contributes an edge when it carries both a component and a
/// requirement reference; anything else (including fully-empty rows) is
/// discarded.
#[must_use]
pub fn build_requirement_graph(rows: &[RawMappingRow]) -> MappingGraph<SrEdge> {
    let mut graph = MappingGraph::new();
    for row in rows {
        if let (Some(component), Some(requirement)) = (row.component_id, row.requirement_id) {
            graph.insert(component, SrEdge { requirement });
        }
    }
    graph
}

/// Builds the component-to-threat graph, with the optional requirement
/// qualifier taken when the row carries one.
#[must_use]
pub fn build_threat_graph(rows: &[RawMappingRow]) -> MappingGraph<ThreatSrEdge> {
    let mut graph = MappingGraph::new();
    for row in rows {
        if let (Some(component), Some(threat)) = (row.component_id, row.threat_id) {
            graph.insert(
                component,
                ThreatSrEdge {
                    threat,
                    requirement: row.requirement_id,
                },
            );
        }
    }
    graph
}

/// Builds the property-chain graph: the most specific non-empty
/// combination of property, option, threat and requirement per row.
#[must_use]
pub fn build_property_graph(rows: &[RawMappingRow]) -> MappingGraph<PropertyEdge> {
    let mut graph = MappingGraph::new();
    for row in rows {
        if let (Some(component), Some(property)) = (row.component_id, row.property_id) {
            graph.insert(
                component,
                PropertyEdge {
                    property,
                    option: row.option_id,
                    threat: row.threat_id,
                    requirement: row.requirement_id,
                },
            );
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftline_core::{PropertyId, PropertyOptionId, RequirementId, ThreatId};
    use uuid::Uuid;

    fn component(n: u128) -> ComponentId {
        ComponentId::from_uuid(Uuid::from_u128(n))
    }

    fn row(component: u128, requirement: u128) -> RawMappingRow {
        RawMappingRow {
            component_id: Some(ComponentId::from_uuid(Uuid::from_u128(component))),
            requirement_id: Some(RequirementId::from_uuid(Uuid::from_u128(requirement))),
            ..Default::default()
        }
    }

    #[test]
    fn sparse_row_yields_exactly_one_sr_edge() {
        // Sparsity: component + requirement populated, nothing else.
        let graph = build_requirement_graph(&[row(1, 10)]);
        assert_eq!(graph.len(), 1);
        let edges = graph.edges(component(1)).unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(
            edges.iter().next().unwrap().requirement,
            RequirementId::from_uuid(Uuid::from_u128(10))
        );
    }

    #[test]
    fn fully_populated_row_yields_one_property_edge_with_all_dimensions() {
        let full = RawMappingRow {
            component_id: Some(component(1)),
            property_id: Some(PropertyId::from_uuid(Uuid::from_u128(2))),
            option_id: Some(PropertyOptionId::from_uuid(Uuid::from_u128(3))),
            threat_id: Some(ThreatId::from_uuid(Uuid::from_u128(4))),
            requirement_id: Some(RequirementId::from_uuid(Uuid::from_u128(5))),
        };
        let graph = build_property_graph(&[full]);
        let edges = graph.edges(component(1)).unwrap();
        assert_eq!(edges.len(), 1);
        let edge = edges.iter().next().unwrap();
        assert!(edge.option.is_some());
        assert!(edge.threat.is_some());
        assert!(edge.requirement.is_some());
    }

    #[test]
    fn empty_rows_are_discarded() {
        let graph = build_requirement_graph(&[RawMappingRow::default()]);
        assert!(graph.is_empty());
    }

    #[test]
    fn rows_without_the_required_dimension_are_discarded() {
        // A requirement row with no component, and a component row with no
        // requirement, both contribute nothing to the requirement graph.
        let orphan = RawMappingRow {
            requirement_id: Some(RequirementId::from_uuid(Uuid::from_u128(10))),
            ..Default::default()
        };
        let bare = RawMappingRow {
            component_id: Some(component(1)),
            ..Default::default()
        };
        let graph = build_requirement_graph(&[orphan, bare]);
        assert!(graph.is_empty());
    }

    #[test]
    fn duplicate_rows_deduplicate_structurally() {
        let graph = build_requirement_graph(&[row(1, 10), row(1, 10)]);
        assert_eq!(graph.edges(component(1)).unwrap().len(), 1);
    }

    #[test]
    fn building_is_order_independent() {
        let forward = build_requirement_graph(&[row(1, 10), row(1, 11), row(2, 10)]);
        let backward = build_requirement_graph(&[row(2, 10), row(1, 11), row(1, 10)]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn threat_rows_keep_the_optional_requirement() {
        let with = RawMappingRow {
            component_id: Some(component(1)),
            threat_id: Some(ThreatId::from_uuid(Uuid::from_u128(4))),
            requirement_id: Some(RequirementId::from_uuid(Uuid::from_u128(5))),
            ..Default::default()
        };
        let without = RawMappingRow {
            component_id: Some(component(1)),
            threat_id: Some(ThreatId::from_uuid(Uuid::from_u128(4))),
            ..Default::default()
        };
        let graph = build_threat_graph(&[with, without]);
        // Same threat, differing qualifier: two distinct edges.
        assert_eq!(graph.edges(component(1)).unwrap().len(), 2);
    }
}
