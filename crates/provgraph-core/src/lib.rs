//! # provgraph-core
//!
//! Entity layer for the digital-object derivation graph.
//!
//! This crate provides:
//! - `DigitalObject` and `ObjectId` (the nodes)
//! - `ObjectViewMapping` (an input endpoint: object qualified by a view)
//! - `DigitalObjectTransition` (the typed hyperedge)
//! - `TransitionType` (open string tag) and `DedupPolicy`
//! - the shared error taxonomy
//!
//! It intentionally does not store or query anything. Canonical state,
//! lineage queries, and resolver dispatch live in `provgraph-store`.
//!
//! ## Data model
//!
//! ```text
//! DigitalObject ──┐
//!                 ├─ (object, view) ─▶ DigitalObjectTransition ─▶ DigitalObject
//! DigitalObject ──┘        inputs            hyperedge              outputs
//! ```

pub mod error;
pub mod mapping;
pub mod object;
pub mod transition;

pub use error::ProvenanceError;
pub use mapping::{DEFAULT_VIEW, ObjectViewMapping};
pub use object::{DigitalObject, ObjectId};
pub use transition::{DedupPolicy, DigitalObjectTransition, TransitionType};
