//! # provgraph-store
//!
//! Canonical state and query layer for the derivation graph.
//!
//! This crate provides:
//! - `ObjectRegistry` (canonical digital-object records)
//! - `TransitionTable` (the id-keyed transition arena)
//! - `LineageStore` (composite create + derived-from / contributes-to)
//! - `TransitionTypeRegistry` and the resolver contract
//! - JSONL snapshot read/write (portable persistence)
//!
//! It is a passive data layer: no threads, no locks, no async. All mutation
//! goes through `&mut` access, so unsynchronized concurrent mutation of one
//! transition is unrepresentable; callers sharing a store across threads
//! wrap it in their own synchronization. Read queries only take `&self`.
//!
//! ## Data model
//!
//! ```text
//! JSONL snapshot (on disk, one tagged record per line)
//!     ↕  hydrate / flush
//! LineageStore = ObjectRegistry + TransitionTable + DedupPolicy
//! ```

pub mod lineage;
pub mod registry;
pub mod resolver;
pub mod snapshot;
pub mod transitions;

pub use lineage::LineageStore;
pub use registry::ObjectRegistry;
pub use resolver::{
    AccessContext, NullResolver, TransitionResolver, TransitionTypeRegistry,
    parse_entity_id_from_data, resolve_transition_entity,
};
pub use snapshot::{
    SnapshotError, SnapshotRecord, read_snapshot, read_snapshot_from_path, write_snapshot,
    write_snapshot_to_path,
};
pub use transitions::TransitionTable;
