//! Symmetric difference of two mapping graphs.

use std::collections::BTreeSet;

use driftline_core::ComponentId;

use crate::graph::MappingGraph;

/// The edge-set difference for one anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorDiff<E> {
    /// The anchor component.
    pub component: ComponentId,
    /// Edges present in `after` only, in ascending edge order.
    pub added: Vec<E>,
    /// Edges present in `before` only, in ascending edge order.
    pub removed: Vec<E>,
}

/// Diffs two graphs of the same relation dimension.
///
/// The iteration domain is the union of both graphs' anchors, ascending;
/// an anchor missing from one side contributes an empty edge set there.
/// Anchors whose edge sets match are omitted entirely, so the result
/// contains only true changes.
#[must_use]
pub fn diff_graphs<E: Ord + Clone>(
    before: &MappingGraph<E>,
    after: &MappingGraph<E>,
) -> Vec<AnchorDiff<E>> {
    let empty = BTreeSet::new();
    let anchors: BTreeSet<ComponentId> = before.anchors().chain(after.anchors()).collect();

    let mut diffs = Vec::new();
    for component in anchors {
        let before_edges = before.edges(component).unwrap_or(&empty);
        let after_edges = after.edges(component).unwrap_or(&empty);

        let added: Vec<E> = after_edges.difference(before_edges).cloned().collect();
        let removed: Vec<E> = before_edges.difference(after_edges).cloned().collect();
        if added.is_empty() && removed.is_empty() {
            continue;
        }

        diffs.push(AnchorDiff {
            component,
            added,
            removed,
        });
    }
    diffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::SrEdge;
    use crate::graph::build_requirement_graph;
    use driftline_core::{RawMappingRow, RequirementId};
    use uuid::Uuid;

    fn component(n: u128) -> ComponentId {
        ComponentId::from_uuid(Uuid::from_u128(n))
    }

    fn requirement(n: u128) -> RequirementId {
        RequirementId::from_uuid(Uuid::from_u128(n))
    }

    fn row(component: u128, requirement: u128) -> RawMappingRow {
        RawMappingRow {
            component_id: Some(ComponentId::from_uuid(Uuid::from_u128(component))),
            requirement_id: Some(RequirementId::from_uuid(Uuid::from_u128(requirement))),
            ..Default::default()
        }
    }

    #[test]
    fn graph_diffed_against_itself_is_empty() {
        let graph = build_requirement_graph(&[row(1, 10), row(2, 10), row(2, 11)]);
        assert!(diff_graphs(&graph, &graph).is_empty());
    }

    #[test]
    fn two_component_scenario() {
        // Before: both components map requirement S1.
        // After: component 1 maps {S1, S2}, component 2 maps nothing.
        let before = build_requirement_graph(&[row(1, 101), row(2, 101)]);
        let after = build_requirement_graph(&[row(1, 101), row(1, 102)]);

        let diffs = diff_graphs(&before, &after);
        assert_eq!(diffs.len(), 2);

        assert_eq!(diffs[0].component, component(1));
        assert_eq!(
            diffs[0].added,
            vec![SrEdge {
                requirement: requirement(102)
            }]
        );
        assert!(diffs[0].removed.is_empty());

        assert_eq!(diffs[1].component, component(2));
        assert!(diffs[1].added.is_empty());
        assert_eq!(
            diffs[1].removed,
            vec![SrEdge {
                requirement: requirement(101)
            }]
        );
    }

    #[test]
    fn diff_is_symmetric() {
        let a = build_requirement_graph(&[row(1, 10), row(2, 20), row(3, 30)]);
        let b = build_requirement_graph(&[row(1, 10), row(2, 21), row(4, 40)]);

        let forward = diff_graphs(&a, &b);
        let backward = diff_graphs(&b, &a);

        assert_eq!(forward.len(), backward.len());
        for (f, b) in forward.iter().zip(backward.iter()) {
            assert_eq!(f.component, b.component);
            assert_eq!(f.added, b.removed);
            assert_eq!(f.removed, b.added);
        }
    }

    #[test]
    fn anchor_missing_from_one_side_diffs_against_empty() {
        let before = build_requirement_graph(&[]);
        let after = build_requirement_graph(&[row(5, 50), row(5, 51)]);

        let diffs = diff_graphs(&before, &after);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].added.len(), 2);
        assert!(diffs[0].removed.is_empty());
    }

    #[test]
    fn anchors_iterate_in_ascending_order() {
        let before = build_requirement_graph(&[row(3, 1), row(1, 1), row(2, 1)]);
        let after = build_requirement_graph(&[]);
        let diffs = diff_graphs(&before, &after);
        let anchors: Vec<ComponentId> = diffs.iter().map(|d| d.component).collect();
        assert_eq!(anchors, vec![component(1), component(2), component(3)]);
    }

    #[test]
    fn edges_within_an_anchor_are_sorted() {
        let before = build_requirement_graph(&[]);
        let after = build_requirement_graph(&[row(1, 30), row(1, 10), row(1, 20)]);
        let diffs = diff_graphs(&before, &after);
        let requirements: Vec<RequirementId> =
            diffs[0].added.iter().map(|e| e.requirement).collect();
        assert_eq!(
            requirements,
            vec![requirement(10), requirement(20), requirement(30)]
        );
    }
}
