//! Wire-shaped transition records: the persisted response shape.

use provgraph_core::DigitalObjectTransition;
use serde::{Deserialize, Serialize};

/// One input binding as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputMappingRecord {
    pub object_id: String,
    pub view_name: String,
}

/// The full transition record returned by every boundary operation.
///
/// Mappings and outputs are sorted by object id so responses are
/// deterministic regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRecord {
    pub id: u64,
    pub transition_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_entity_id: Option<String>,
    pub creation_timestamp: i64,
    pub input_object_view_mappings: Vec<InputMappingRecord>,
    pub output_objects: Vec<String>,
}

impl TransitionRecord {
    pub fn from_transition(transition: &DigitalObjectTransition) -> Self {
        let mut mappings: Vec<InputMappingRecord> = transition
            .input_object_view_mappings
            .iter()
            .map(|mapping| InputMappingRecord {
                object_id: mapping.object_id.to_string(),
                view_name: mapping.view_name.clone(),
            })
            .collect();
        mappings.sort_by(|a, b| a.object_id.cmp(&b.object_id));

        let mut outputs: Vec<String> = transition
            .output_objects
            .iter()
            .map(|object_id| object_id.to_string())
            .collect();
        outputs.sort();

        TransitionRecord {
            id: transition.id.unwrap_or(0),
            transition_type: transition.transition_type.as_str().to_string(),
            transition_entity_id: transition.transition_entity_id.clone(),
            creation_timestamp: transition.creation_timestamp,
            input_object_view_mappings: mappings,
            output_objects: outputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provgraph_core::{DedupPolicy, ObjectId};

    #[test]
    fn record_orders_mappings_and_outputs_deterministically() {
        let mut transition = DigitalObjectTransition::new();
        transition.id = Some(3);
        transition.creation_timestamp = 1_700_000_000_000;
        for (id, view) in [("zeta", "default"), ("alpha", "reduced")] {
            transition.add_input_mapping(
                ObjectId::new(id).expect("id must build"),
                view,
                DedupPolicy::ByObject,
            );
        }
        for id in ["out-b", "out-a"] {
            transition.add_output_object(ObjectId::new(id).expect("id must build"));
        }

        let record = TransitionRecord::from_transition(&transition);
        assert_eq!(record.input_object_view_mappings[0].object_id, "alpha");
        assert_eq!(record.input_object_view_mappings[1].object_id, "zeta");
        assert_eq!(record.output_objects, vec!["out-a", "out-b"]);

        insta::assert_json_snapshot!(record);
    }
}
