//! Merges per-dimension graph diffs into per-component mapping drift.
//!
//! The aggregator is where durable identifiers leave the pipeline: every
//! referenced entity is resolved to its compact id through the identity
//! index (dynamic assignment included, so a reference to a brand-new
//! entity never fails), and the output is re-sorted in compact-id space
//! so the rendered artifacts are stable across runs.

use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use driftline_core::{CompactId, ComponentId, Result};
use driftline_index::IdentityIndex;

use crate::differ::AnchorDiff;
use crate::edge::{
    PropertyEdge, PropertyEdgeRef, SrEdge, SrEdgeRef, ThreatSrEdge, ThreatSrEdgeRef,
};

/// Added/removed edge lists for one dimension of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeDrift<E> {
    pub added: Vec<E>,
    pub removed: Vec<E>,
}

impl<E> Default for EdgeDrift<E> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<E> EdgeDrift<E> {
    /// True when the dimension did not drift.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// All mapping drift of one component, across the three dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingDrift {
    /// Durable identifier of the component.
    pub component_id: ComponentId,
    /// Compact id of the component; the ordering key of the report.
    pub component_ref: CompactId,
    pub requirements: EdgeDrift<SrEdgeRef>,
    pub threats: EdgeDrift<ThreatSrEdgeRef>,
    pub properties: EdgeDrift<PropertyEdgeRef>,
}

impl MappingDrift {
    fn new(component_id: ComponentId, component_ref: CompactId) -> Self {
        Self {
            component_id,
            component_ref,
            requirements: EdgeDrift::default(),
            threats: EdgeDrift::default(),
            properties: EdgeDrift::default(),
        }
    }

    /// True when every dimension is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty() && self.threats.is_empty() && self.properties.is_empty()
    }
}

/// Composes the three dimensions' diffs into one record per component.
///
/// Components are merged by durable id and emitted ordered by compact id;
/// edge lists are re-sorted under the resolved identifiers. One record is
/// emitted per component with at least one non-empty dimension.
pub async fn compose(
    index: &IdentityIndex,
    requirements: Vec<AnchorDiff<SrEdge>>,
    threats: Vec<AnchorDiff<ThreatSrEdge>>,
    properties: Vec<AnchorDiff<PropertyEdge>>,
) -> Result<Vec<MappingDrift>> {
    let mut drifts: BTreeMap<ComponentId, MappingDrift> = BTreeMap::new();

    for diff in requirements {
        let mut resolved = EdgeDrift::default();
        for edge in diff.added {
            resolved.added.push(resolve_sr(index, edge).await?);
        }
        for edge in diff.removed {
            resolved.removed.push(resolve_sr(index, edge).await?);
        }
        drift_entry(&mut drifts, index, diff.component)
            .await?
            .requirements = resolved;
    }

    for diff in threats {
        let mut resolved = EdgeDrift::default();
        for edge in diff.added {
            resolved.added.push(resolve_threat(index, edge).await?);
        }
        for edge in diff.removed {
            resolved.removed.push(resolve_threat(index, edge).await?);
        }
        drift_entry(&mut drifts, index, diff.component).await?.threats = resolved;
    }

    for diff in properties {
        let mut resolved = EdgeDrift::default();
        for edge in diff.added {
            resolved.added.push(resolve_property(index, edge).await?);
        }
        for edge in diff.removed {
            resolved.removed.push(resolve_property(index, edge).await?);
        }
        drift_entry(&mut drifts, index, diff.component)
            .await?
            .properties = resolved;
    }

    let mut result: Vec<MappingDrift> = drifts.into_values().filter(|d| !d.is_empty()).collect();
    for drift in &mut result {
        drift.requirements.added.sort_unstable();
        drift.requirements.removed.sort_unstable();
        drift.threats.added.sort_unstable();
        drift.threats.removed.sort_unstable();
        drift.properties.added.sort_unstable();
        drift.properties.removed.sort_unstable();
    }
    result.sort_by_key(|drift| (drift.component_ref, drift.component_id));

    tracing::debug!(components = result.len(), "composed mapping drift");
    Ok(result)
}

async fn drift_entry<'a>(
    drifts: &'a mut BTreeMap<ComponentId, MappingDrift>,
    index: &IdentityIndex,
    component: ComponentId,
) -> Result<&'a mut MappingDrift> {
    let component_ref = index.resolve(Uuid::from(component)).await?;
    Ok(drifts
        .entry(component)
        .or_insert_with(|| MappingDrift::new(component, component_ref)))
}

async fn resolve_sr(index: &IdentityIndex, edge: SrEdge) -> Result<SrEdgeRef> {
    Ok(SrEdgeRef {
        requirement: index.resolve(Uuid::from(edge.requirement)).await?,
    })
}

async fn resolve_threat(index: &IdentityIndex, edge: ThreatSrEdge) -> Result<ThreatSrEdgeRef> {
    Ok(ThreatSrEdgeRef {
        threat: index.resolve(Uuid::from(edge.threat)).await?,
        requirement: resolve_optional(index, edge.requirement.map(Uuid::from)).await?,
    })
}

async fn resolve_property(index: &IdentityIndex, edge: PropertyEdge) -> Result<PropertyEdgeRef> {
    Ok(PropertyEdgeRef {
        property: index.resolve(Uuid::from(edge.property)).await?,
        option: resolve_optional(index, edge.option.map(Uuid::from)).await?,
        threat: resolve_optional(index, edge.threat.map(Uuid::from)).await?,
        requirement: resolve_optional(index, edge.requirement.map(Uuid::from)).await?,
    })
}

async fn resolve_optional(index: &IdentityIndex, id: Option<Uuid>) -> Result<Option<CompactId>> {
    match id {
        Some(id) => Ok(Some(index.resolve(id).await?)),
        None => Ok(None),
    }
}
