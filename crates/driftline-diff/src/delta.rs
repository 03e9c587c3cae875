//! Entity-set deltas: added, removed and modified records of one kind.

use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use driftline_core::{Identified, Result};

use crate::fields::{compare, Diffable, FieldChange};

/// One modified entity with its field-level changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityChange<T> {
    /// The before-side record.
    pub before: T,
    /// The after-side record.
    pub after: T,
    /// Field changes, in the order they were requested.
    pub fields: Vec<FieldChange>,
}

/// Added/removed/modified split for one entity kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDelta<T> {
    pub added: Vec<T>,
    pub removed: Vec<T>,
    pub modified: Vec<EntityChange<T>>,
}

impl<T> Default for EntityDelta<T> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
            modified: Vec::new(),
        }
    }
}

impl<T> EntityDelta<T> {
    /// True when nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Total number of changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

/// Classifies each entity across the two sides of a reconciliation run.
///
/// Entities are matched by durable id. An entity present on both sides
/// whose requested fields all compare equal is unchanged and is dropped;
/// an empty modification is never emitted. Output lists are ordered by
/// entity id so runs are reproducible.
pub fn diff_entities<T>(before: &[T], after: &[T], fields: &[&str]) -> Result<EntityDelta<T>>
where
    T: Diffable + Identified + Clone,
{
    let before_by_id: HashMap<Uuid, &T> = before.iter().map(|e| (e.entity_id(), e)).collect();
    let after_by_id: HashMap<Uuid, &T> = after.iter().map(|e| (e.entity_id(), e)).collect();

    let mut delta = EntityDelta::default();

    let mut before_ids: Vec<Uuid> = before_by_id.keys().copied().collect();
    before_ids.sort_unstable();
    for id in before_ids {
        let old = before_by_id[&id];
        match after_by_id.get(&id) {
            None => delta.removed.push(old.clone()),
            Some(new) => {
                let changes = compare(old, *new, fields)?;
                if !changes.is_empty() {
                    delta.modified.push(EntityChange {
                        before: old.clone(),
                        after: (*new).clone(),
                        fields: changes,
                    });
                }
            }
        }
    }

    let mut after_ids: Vec<Uuid> = after_by_id.keys().copied().collect();
    after_ids.sort_unstable();
    for id in after_ids {
        if !before_by_id.contains_key(&id) {
            delta.added.push(after_by_id[&id].clone());
        }
    }

    Ok(delta)
}
