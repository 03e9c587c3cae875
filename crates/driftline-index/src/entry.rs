//! Persisted index entries and the on-disk file format.
//!
//! The index file is a versioned envelope around a flat list of entries,
//! pretty-printed JSON, entries sorted by compact id. The format is meant
//! to live in version control next to the declarative files, so it must
//! diff cleanly and carry no binary framing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

use driftline_core::{CompactId, DriftError, EntityKind, Result};

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

/// One persisted pairing of a durable identifier with a compact integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Durable identifier.
    pub id: Uuid,
    /// Assigned compact integer, unique within the file, starting at 1.
    pub compact_id: CompactId,
    /// Owning collection identifier.
    pub collection_id: Uuid,
    /// Entity kind.
    pub kind: EntityKind,
}

/// Versioned envelope for the persisted entry list.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexFile {
    version: u32,
    entries: Vec<IndexEntry>,
}

/// Serializes entries into the canonical file form.
///
/// Entries are written sorted by compact id so regeneration over the same
/// identifier set produces a byte-identical file.
pub fn encode_entries(entries: &[IndexEntry]) -> Result<Vec<u8>> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|entry| entry.compact_id);
    let file = IndexFile {
        version: FORMAT_VERSION,
        entries: sorted,
    };
    let mut bytes = serde_json::to_vec_pretty(&file).map_err(|e| DriftError::InvalidFormat {
        context: "index entries".to_string(),
        message: e.to_string(),
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parses and validates an index file.
///
/// Any defect (malformed JSON, an unknown kind, an unsupported version, a
/// nonpositive or duplicate compact id, a duplicate identifier) aborts the
/// whole load with [`DriftError::InvalidFormat`]. A partially applied index
/// is never produced.
pub fn decode_entries(bytes: &[u8], path: &Path) -> Result<Vec<IndexEntry>> {
    let context = path.display().to_string();
    let file: IndexFile =
        serde_json::from_slice(bytes).map_err(|e| DriftError::InvalidFormat {
            context: context.clone(),
            message: e.to_string(),
        })?;

    if file.version != FORMAT_VERSION {
        return Err(DriftError::InvalidFormat {
            context,
            message: format!(
                "unsupported index format version {} (expected {FORMAT_VERSION})",
                file.version
            ),
        });
    }

    let mut seen_ids = HashSet::with_capacity(file.entries.len());
    let mut seen_compact = HashSet::with_capacity(file.entries.len());
    for entry in &file.entries {
        if entry.compact_id.get() == 0 {
            return Err(DriftError::InvalidFormat {
                context: context.clone(),
                message: format!("entry {} has compact id 0", entry.id),
            });
        }
        if !seen_ids.insert(entry.id) {
            return Err(DriftError::InvalidFormat {
                context: context.clone(),
                message: format!("duplicate identifier {}", entry.id),
            });
        }
        if !seen_compact.insert(entry.compact_id) {
            return Err(DriftError::InvalidFormat {
                context: context.clone(),
                message: format!("duplicate compact id {}", entry.compact_id),
            });
        }
    }

    Ok(file.entries)
}
