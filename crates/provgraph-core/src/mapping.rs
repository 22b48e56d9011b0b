//! Object-view mapping: an input endpoint of a transition.

use crate::object::ObjectId;
use serde::{Deserialize, Serialize};

/// The view name used when a caller does not specify one.
pub const DEFAULT_VIEW: &str = "default";

/// Binds one digital object, qualified by a named view of its internal data
/// organization, into a transition's input set.
///
/// The mapping references the object by external identifier; it does not own
/// the object record. Within one transition's input set no two mappings may
/// reference the same object (see `DedupPolicy` for the exact key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectViewMapping {
    pub object_id: ObjectId,
    pub view_name: String,
}

impl ObjectViewMapping {
    pub fn new(object_id: ObjectId, view_name: impl Into<String>) -> Self {
        let view_name = view_name.into();
        ObjectViewMapping {
            object_id,
            view_name: if view_name.trim().is_empty() {
                DEFAULT_VIEW.to_string()
            } else {
                view_name
            },
        }
    }
}
