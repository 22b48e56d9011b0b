//! Digital object: the node type of the derivation graph.

use crate::error::ProvenanceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// External identifier of a digital object.
///
/// Globally unique, assigned exactly once at creation, never changed.
/// All dedup and equality logic in this subsystem keys on this identifier;
/// the internal `base_id` is a persistence artifact and never participates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wrap a caller-supplied identifier. Empty or whitespace-only
    /// identifiers are rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, ProvenanceError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ProvenanceError::invalid(
                "object identifier must be non-empty",
            ));
        }
        Ok(ObjectId(id))
    }

    /// Generate a fresh random identifier (uuid v4).
    pub fn generate() -> Self {
        ObjectId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A digital object: a stable, externally identified unit of managed
/// research data.
///
/// Objects are shared (read-mostly) across many transitions. A transition
/// references objects by `ObjectId`; the registry owns the records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalObject {
    /// Internal identifier, assigned by the registry on first insert and
    /// immutable thereafter. `None` for objects not yet registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_id: Option<u64>,

    /// External identifier. Set exactly once at creation.
    pub object_id: ObjectId,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,

    /// Hidden objects stay in the graph; this subsystem never deletes nodes.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl DigitalObject {
    /// Build an object with the given external identifier.
    pub fn new(object_id: ObjectId) -> Self {
        DigitalObject {
            base_id: None,
            object_id,
            label: String::new(),
            note: String::new(),
            visible: true,
        }
    }

    /// Build an object with a freshly generated external identifier.
    pub fn with_generated_id() -> Self {
        DigitalObject::new(ObjectId::generate())
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Equality over the external identifier only.
impl PartialEq for DigitalObject {
    fn eq(&self, other: &Self) -> bool {
        self.object_id == other.object_id
    }
}

impl Eq for DigitalObject {}

impl std::hash::Hash for DigitalObject {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.object_id.hash(state);
    }
}
