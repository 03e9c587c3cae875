//! On-demand compact-id assignment for identifiers outside the snapshot.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use uuid::Uuid;

use driftline_core::CompactId;

/// Process-lifetime allocator for identifiers the persisted index has not
/// seen yet.
///
/// Assignment is idempotent: two resolutions of the same identifier, even
/// racing on different threads, converge on one value. Values are handed
/// out above the snapshot's high-water mark and are never persisted back
/// into the index file.
#[derive(Debug)]
pub struct DynamicAssignments {
    assigned: DashMap<Uuid, CompactId>,
    next: AtomicU32,
}

impl DynamicAssignments {
    /// Creates an allocator that hands out values above `floor`.
    #[must_use]
    pub fn new(floor: u32) -> Self {
        Self {
            assigned: DashMap::new(),
            next: AtomicU32::new(floor + 1),
        }
    }

    /// Returns the identifier's assigned value, allocating one on first use.
    pub fn resolve(&self, id: Uuid) -> CompactId {
        *self
            .assigned
            .entry(id)
            .or_insert_with(|| CompactId::new(self.next.fetch_add(1, Ordering::SeqCst)))
    }

    /// Returns the already-assigned value, if any, without allocating.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<CompactId> {
        self.assigned.get(&id).map(|entry| *entry)
    }

    /// Reverse scan: the identifier assigned a given value, if any.
    #[must_use]
    pub fn reverse(&self, compact_id: CompactId) -> Option<Uuid> {
        self.assigned
            .iter()
            .find(|entry| *entry.value() == compact_id)
            .map(|entry| *entry.key())
    }

    /// Raises the allocation floor after the snapshot grew.
    ///
    /// Existing assignments are kept; only future allocations move above
    /// the new mark.
    pub fn raise_floor(&self, floor: u32) {
        self.next.fetch_max(floor + 1, Ordering::SeqCst);
    }

    /// Number of live assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    /// True when nothing has been assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
