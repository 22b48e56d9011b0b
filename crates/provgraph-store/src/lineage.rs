//! Lineage store: composite creation and the two standard lineage queries.

use crate::registry::ObjectRegistry;
use crate::resolver::parse_entity_id_from_data;
use crate::snapshot::{self, SnapshotError, SnapshotRecord};
use crate::transitions::TransitionTable;
use chrono::Utc;
use provgraph_core::{
    DEFAULT_VIEW, DedupPolicy, DigitalObjectTransition, ObjectId, ProvenanceError,
    TransitionType,
};
use std::path::Path;

/// The canonical derivation-graph state: object registry plus transition
/// table, with the input-dedup policy fixed at construction.
///
/// All mutation goes through `&mut self`; read queries are `&self` and may
/// run fully concurrently under shared borrows.
#[derive(Debug, Clone, Default)]
pub struct LineageStore {
    objects: ObjectRegistry,
    transitions: TransitionTable,
    dedup_policy: DedupPolicy,
}

impl LineageStore {
    pub fn new() -> Self {
        LineageStore::default()
    }

    pub fn with_dedup_policy(dedup_policy: DedupPolicy) -> Self {
        LineageStore {
            dedup_policy,
            ..LineageStore::default()
        }
    }

    pub fn dedup_policy(&self) -> DedupPolicy {
        self.dedup_policy
    }

    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.objects
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    // ── Lineage queries ──

    /// All transitions whose output set contains the object: "what produced
    /// this object". Usually zero or one result, but multiple producing
    /// transitions are legal.
    pub fn derived_from(&self, object_id: &ObjectId) -> Vec<&DigitalObjectTransition> {
        self.transitions
            .transitions()
            .filter(|transition| transition.has_output(object_id))
            .collect()
    }

    /// All transitions consuming the object as an input, view ignored:
    /// "what did this object contribute to".
    pub fn contributes_to(&self, object_id: &ObjectId) -> Vec<&DigitalObjectTransition> {
        self.transitions
            .transitions()
            .filter(|transition| transition.has_input(object_id))
            .collect()
    }

    /// The transition carrying the given external entity id, if any. Entity
    /// ids are unique per type, so zero or one result is expected.
    pub fn find_by_entity_id(&self, entity_id: &str) -> Option<&DigitalObjectTransition> {
        self.transitions
            .transitions()
            .find(|transition| transition.transition_entity_id.as_deref() == Some(entity_id))
    }

    // ── Composite creation ──

    /// Create an n:n transition.
    ///
    /// `inputs` and `outputs` must both be non-empty, every referenced
    /// object must be registered, and a non-NONE `transition_type` requires
    /// `type_data` naming the external entity. `type_data` in the
    /// `{"transitionEntityId":"..."}` wire shape references a previously
    /// persisted entity and binds that id; any other shape is stored as the
    /// entity id verbatim. Input bindings run through the configured dedup
    /// policy; outputs use set semantics. The creation timestamp is stamped
    /// with the current time.
    pub fn create_transition(
        &mut self,
        inputs: &[(ObjectId, String)],
        outputs: &[ObjectId],
        transition_type: TransitionType,
        type_data: Option<&str>,
    ) -> Result<u64, ProvenanceError> {
        if inputs.is_empty() {
            return Err(ProvenanceError::invalid(
                "transition input mappings must be non-empty",
            ));
        }
        if outputs.is_empty() {
            return Err(ProvenanceError::invalid(
                "transition output objects must be non-empty",
            ));
        }
        if !transition_type.is_none() && type_data.is_none() {
            return Err(ProvenanceError::invalid(format!(
                "transition type '{transition_type}' requires type data"
            )));
        }
        for (object_id, _) in inputs {
            if !self.objects.contains(object_id) {
                return Err(ProvenanceError::ObjectNotFound(object_id.clone()));
            }
        }
        for object_id in outputs {
            if !self.objects.contains(object_id) {
                return Err(ProvenanceError::ObjectNotFound(object_id.clone()));
            }
        }

        let id = self.transitions.create();
        for (object_id, view_name) in inputs {
            self.transitions
                .add_input_mapping(id, object_id.clone(), view_name, self.dedup_policy)?;
        }
        for object_id in outputs {
            self.transitions.add_output_object(id, object_id.clone())?;
        }
        self.transitions.set_transition_type(id, transition_type)?;
        if let Some(data) = type_data {
            let entity_id =
                parse_entity_id_from_data(data).unwrap_or_else(|| data.to_string());
            self.transitions.set_transition_entity_id(id, entity_id)?;
        }
        self.transitions
            .set_creation_timestamp(id, Utc::now().timestamp_millis())?;
        Ok(id)
    }

    /// Create a 1:1 transition from the single-object convenience form.
    ///
    /// `object` and `other` name the two participants. An `output` of
    /// `None` means `other` is the output and `object` the input. Otherwise
    /// the designated output must equal one of the two participants; when
    /// it equals `object`, the roles swap so that `other` becomes the
    /// input. `view_name` of `None` binds the default view.
    pub fn create_single_transition(
        &mut self,
        object: &ObjectId,
        other: &ObjectId,
        view_name: Option<&str>,
        output: Option<&ObjectId>,
        transition_type: TransitionType,
        type_data: Option<&str>,
    ) -> Result<u64, ProvenanceError> {
        let (input, output) = match output {
            None => (object, other),
            Some(designated) if designated == other => (object, other),
            Some(designated) if designated == object => (other, object),
            Some(designated) => {
                return Err(ProvenanceError::invalid(format!(
                    "output object '{designated}' matches neither '{object}' nor '{other}'"
                )));
            }
        };

        let view = view_name.unwrap_or(DEFAULT_VIEW).to_string();
        self.create_transition(
            &[(input.clone(), view)],
            &[output.clone()],
            transition_type,
            type_data,
        )
    }

    /// Remove every transition where the object appears as input or output.
    /// Returns the number of removed transitions. Only needed when the
    /// containing system retires the object itself.
    pub fn remove_transitions_involving(&mut self, object_id: &ObjectId) -> usize {
        let doomed: Vec<u64> = self
            .transitions
            .transitions()
            .filter(|t| t.has_input(object_id) || t.has_output(object_id))
            .filter_map(|t| t.id)
            .collect();
        let mut removed = 0;
        for id in &doomed {
            if self.transitions.remove(*id).is_some() {
                removed += 1;
            }
        }
        removed
    }

    // ── Snapshot persistence ──

    /// Hydrate a store from a JSONL snapshot file.
    pub fn load_jsonl(
        path: impl AsRef<Path>,
        dedup_policy: DedupPolicy,
    ) -> Result<Self, SnapshotError> {
        let records = snapshot::read_snapshot_from_path(path)?;
        let mut objects = Vec::new();
        let mut transitions = Vec::new();
        for record in records {
            match record {
                SnapshotRecord::Object(object) => objects.push(object),
                SnapshotRecord::Transition(transition) => transitions.push(transition),
            }
        }
        Ok(LineageStore {
            objects: ObjectRegistry::from_objects(objects),
            transitions: TransitionTable::from_transitions(transitions),
            dedup_policy,
        })
    }

    /// Persist the store to a JSONL snapshot file.
    pub fn save_jsonl(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let records: Vec<SnapshotRecord> = self
            .objects
            .objects()
            .cloned()
            .map(SnapshotRecord::Object)
            .chain(
                self.transitions
                    .transitions()
                    .cloned()
                    .map(SnapshotRecord::Transition),
            )
            .collect();
        snapshot::write_snapshot_to_path(path, &records)
    }
}
