//! # driftline-index
//!
//! The identity index: a bidirectional mapping between durable 128-bit
//! identifiers and compact sequential integers, scoped by entity kind and
//! owning collection.
//!
//! The persisted form is a versioned, human-diffable JSON file of
//! [`IndexEntry`] records. At runtime the file is projected into an
//! [`IndexSnapshot`], cached once per backing path behind a path-scoped
//! load gate, and supplemented by process-lifetime [`DynamicAssignments`]
//! for identifiers the file has not seen yet.
//!
//! ## Determinism
//!
//! A generation pass sorts every identifier ascending and assigns compact
//! ids 1..N, so two passes over the same identifier set produce
//! byte-identical files. The file is written through the storage
//! collaborator's atomic-replace primitive and the in-memory snapshot is
//! swapped only after the full result is built; no reader ever observes a
//! partial index.

pub mod cache;
pub mod dynamic;
pub mod entry;
pub mod service;
pub mod snapshot;
pub mod store;

pub use cache::SnapshotCache;
pub use dynamic::DynamicAssignments;
pub use entry::{decode_entries, encode_entries, IndexEntry, FORMAT_VERSION};
pub use service::{GenerateScope, IdentityIndex, IndexConfig};
pub use snapshot::{IndexSnapshot, IndexedEntity};
pub use store::FsIndexStore;
