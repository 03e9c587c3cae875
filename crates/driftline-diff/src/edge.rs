//! Mapping edges: one relationship tuple per relation dimension.
//!
//! Edges are pure value types with structural equality and a total order.
//! The order is what makes drift output reproducible: within an anchor,
//! edges sort by their identifiers with a populated optional dimension
//! sorting before an absent one.

use serde::Serialize;
use std::cmp::Ordering;

use driftline_core::{CompactId, PropertyId, PropertyOptionId, RequirementId, ThreatId};

/// Compares optional dimensions: present sorts before absent.
pub(crate) fn cmp_option<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Component-to-security-requirement edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SrEdge {
    pub requirement: RequirementId,
}

impl Ord for SrEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.requirement.cmp(&other.requirement)
    }
}

impl PartialOrd for SrEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Component-to-threat edge, optionally qualified by a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ThreatSrEdge {
    pub threat: ThreatId,
    pub requirement: Option<RequirementId>,
}

impl Ord for ThreatSrEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.threat
            .cmp(&other.threat)
            .then_with(|| cmp_option(&self.requirement, &other.requirement))
    }
}

impl PartialOrd for ThreatSrEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Component-to-property chain edge, up to five dimensions deep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PropertyEdge {
    pub property: PropertyId,
    pub option: Option<PropertyOptionId>,
    pub threat: Option<ThreatId>,
    pub requirement: Option<RequirementId>,
}

impl Ord for PropertyEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.property
            .cmp(&other.property)
            .then_with(|| cmp_option(&self.option, &other.option))
            .then_with(|| cmp_option(&self.threat, &other.threat))
            .then_with(|| cmp_option(&self.requirement, &other.requirement))
    }
}

impl PartialOrd for PropertyEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// [`SrEdge`] resolved into compact-id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SrEdgeRef {
    pub requirement: CompactId,
}

impl Ord for SrEdgeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.requirement.cmp(&other.requirement)
    }
}

impl PartialOrd for SrEdgeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// [`ThreatSrEdge`] resolved into compact-id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ThreatSrEdgeRef {
    pub threat: CompactId,
    pub requirement: Option<CompactId>,
}

impl Ord for ThreatSrEdgeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.threat
            .cmp(&other.threat)
            .then_with(|| cmp_option(&self.requirement, &other.requirement))
    }
}

impl PartialOrd for ThreatSrEdgeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// [`PropertyEdge`] resolved into compact-id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PropertyEdgeRef {
    pub property: CompactId,
    pub option: Option<CompactId>,
    pub threat: Option<CompactId>,
    pub requirement: Option<CompactId>,
}

impl Ord for PropertyEdgeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.property
            .cmp(&other.property)
            .then_with(|| cmp_option(&self.option, &other.option))
            .then_with(|| cmp_option(&self.threat, &other.threat))
            .then_with(|| cmp_option(&self.requirement, &other.requirement))
    }
}

impl PartialOrd for PropertyEdgeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
