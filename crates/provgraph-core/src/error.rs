//! Error types shared across the provgraph crates.

use crate::object::ObjectId;
use crate::transition::TransitionType;

/// Errors raised by entity construction, registry, and lineage operations.
///
/// Everything here is surfaced synchronously to the caller; nothing is
/// retried internally. Resolving a transition's external detail entity is
/// the deliberate exception to this taxonomy: it returns `Option` rather
/// than an error, because missing detail must not invalidate a transition.
#[derive(Debug, thiserror::Error)]
pub enum ProvenanceError {
    /// A required argument is absent, empty, or inconsistent.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// No digital object is registered under the given external identifier.
    #[error("digital object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// No transition exists for the given id.
    #[error("transition not found: {0}")]
    TransitionNotFound(u64),

    /// No resolver is registered for the given transition type.
    #[error("no resolver registered for transition type '{0}'")]
    ResolverNotFound(TransitionType),

    /// An object with the same external identifier is already registered.
    #[error("digital object already registered: {0}")]
    DuplicateObject(ObjectId),

    /// Snapshot or I/O failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ProvenanceError {
    /// Shorthand for `InvalidArgument`.
    pub fn invalid(reason: impl Into<String>) -> Self {
        ProvenanceError::InvalidArgument {
            reason: reason.into(),
        }
    }
}
