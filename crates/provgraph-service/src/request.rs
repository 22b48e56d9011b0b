//! Request DTOs for the boundary operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Single-transition form: one named input, one counterpart object, an
/// optional designated output.
///
/// `view_name` of `None` binds the default view. `output_object_id` of
/// `None` means the counterpart (`other_object_id`) is the output; when
/// supplied, it must equal one of the two participating objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTransitionRequest {
    pub input_object_id: String,
    pub other_object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_data: Option<String>,
}

/// n:n form: a map of input object id to view name plus a list of output
/// object ids. Both must be non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTransitionSetRequest {
    /// BTreeMap keeps binding order deterministic across callers.
    pub input_object_view_map: BTreeMap<String, String>,
    pub output_objects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_data: Option<String>,
}
