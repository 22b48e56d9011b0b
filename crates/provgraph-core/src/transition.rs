//! Digital-object transition: the typed hyperedge of the derivation graph.

use crate::mapping::ObjectViewMapping;
use crate::object::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Open, extensible transition type tag.
///
/// The tag selects which resolver interprets the transition-entity
/// identifier. It carries no data of its own. `None` is the sentinel for
/// untyped transitions; `DataWorkflow` and `Elasticsearch` are the
/// well-known platform types; anything else travels as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransitionType {
    None,
    DataWorkflow,
    Elasticsearch,
    Other(String),
}

impl TransitionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransitionType::None => "NONE",
            TransitionType::DataWorkflow => "DATAWORKFLOW",
            TransitionType::Elasticsearch => "ELASTICSEARCH",
            TransitionType::Other(tag) => tag,
        }
    }

    /// Parse a tag string. Unknown tags map to `Other`, keeping the type
    /// set open for caller-defined transition kinds.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "" | "NONE" => TransitionType::None,
            "DATAWORKFLOW" => TransitionType::DataWorkflow,
            "ELASTICSEARCH" => TransitionType::Elasticsearch,
            _ => TransitionType::Other(tag.trim().to_string()),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, TransitionType::None)
    }
}

impl Default for TransitionType {
    fn default() -> Self {
        TransitionType::None
    }
}

impl fmt::Display for TransitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TransitionType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransitionType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(TransitionType::from_tag(&tag))
    }
}

/// Dedup key for input mappings within one transition.
///
/// `ByObject` is the source-faithful behavior: the first mapping for a given
/// object wins and a later bind of the same object is a silent no-op even
/// under a different view. `ByObjectAndView` keys on the (object, view)
/// pair, so the same object may legitimately contribute two distinct views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupPolicy {
    #[default]
    ByObject,
    ByObjectAndView,
}

/// A transition: records that a set of input (object, view) pairs was
/// processed to produce a set of output objects.
///
/// The detailed description of the processing step (a computation record, a
/// preservation task, ...) is stored externally; `transition_entity_id`
/// names it and the type-specific resolver interprets it.
///
/// The entity itself enforces neither non-empty inputs/outputs nor
/// acyclicity; those are boundary concerns. Once the creating caller has
/// fixed inputs and outputs, the transition is only ever extended
/// additively, never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalObjectTransition {
    /// Internal identifier, assigned by the transition table on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default)]
    pub transition_type: TransitionType,

    /// Opaque identifier of the externally stored transition entity. Its
    /// interpretation belongs to the type-specific resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_entity_id: Option<String>,

    /// Logical creation time, epoch millis. Caller- or system-assigned.
    #[serde(default)]
    pub creation_timestamp: i64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_object_view_mappings: Vec<ObjectViewMapping>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_objects: Vec<ObjectId>,
}

impl DigitalObjectTransition {
    /// A fresh transition: empty input/output sets, type NONE, timestamp 0.
    pub fn new() -> Self {
        DigitalObjectTransition {
            id: None,
            transition_type: TransitionType::None,
            transition_entity_id: None,
            creation_timestamp: 0,
            input_object_view_mappings: Vec::new(),
            output_objects: Vec::new(),
        }
    }

    /// Bind one (object, view) pair into the input set.
    ///
    /// Scans existing mappings under the given policy before inserting; a
    /// duplicate bind is a silent no-op that keeps the existing view
    /// binding. Returns whether a mapping was inserted.
    ///
    /// The scan-then-insert is not atomic against concurrent callers; the
    /// store serializes all mutation behind `&mut` access.
    pub fn add_input_mapping(
        &mut self,
        object_id: ObjectId,
        view_name: impl Into<String>,
        policy: DedupPolicy,
    ) -> bool {
        let mapping = ObjectViewMapping::new(object_id, view_name);
        let duplicate = self.input_object_view_mappings.iter().any(|existing| {
            match policy {
                DedupPolicy::ByObject => existing.object_id == mapping.object_id,
                DedupPolicy::ByObjectAndView => {
                    existing.object_id == mapping.object_id
                        && existing.view_name == mapping.view_name
                }
            }
        });
        if duplicate {
            return false;
        }
        self.input_object_view_mappings.push(mapping);
        true
    }

    /// Add one output object. Set semantics keyed by object identity;
    /// re-adding is a no-op. Returns whether the object was inserted.
    pub fn add_output_object(&mut self, object_id: ObjectId) -> bool {
        if self.output_objects.contains(&object_id) {
            return false;
        }
        self.output_objects.push(object_id);
        true
    }

    /// Whether `object_id` appears in the input mapping set, view ignored.
    pub fn has_input(&self, object_id: &ObjectId) -> bool {
        self.input_object_view_mappings
            .iter()
            .any(|mapping| &mapping.object_id == object_id)
    }

    /// Whether `object_id` appears in the output set.
    pub fn has_output(&self, object_id: &ObjectId) -> bool {
        self.output_objects.contains(object_id)
    }

    /// The view bound for `object_id`, if it is an input.
    pub fn input_view(&self, object_id: &ObjectId) -> Option<&str> {
        self.input_object_view_mappings
            .iter()
            .find(|mapping| &mapping.object_id == object_id)
            .map(|mapping| mapping.view_name.as_str())
    }
}

impl Default for DigitalObjectTransition {
    fn default() -> Self {
        DigitalObjectTransition::new()
    }
}
