//! Transition table: the id-keyed arena of transition records.

use provgraph_core::{
    DedupPolicy, DigitalObjectTransition, ObjectId, ProvenanceError, TransitionType,
};
use std::collections::BTreeMap;

/// Id-keyed arena of transitions.
///
/// Transitions reference objects by external identifier only; the object
/// records themselves live in the `ObjectRegistry`. Iteration order is
/// deterministic by id.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    transitions: BTreeMap<u64, DigitalObjectTransition>,
    next_id: u64,
}

impl TransitionTable {
    pub fn new() -> Self {
        TransitionTable::default()
    }

    /// Hydrate a table from materialized records. Records without an id get
    /// one assigned; duplicate ids resolve last-write-wins.
    pub fn from_transitions(records: Vec<DigitalObjectTransition>) -> Self {
        let mut table = TransitionTable::new();
        for mut record in records {
            let id = match record.id {
                Some(id) => {
                    table.next_id = table.next_id.max(id);
                    id
                }
                None => table.allocate_id(),
            };
            record.id = Some(id);
            table.transitions.insert(id, record);
        }
        table
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Create a fresh transition: empty input/output sets, type NONE.
    pub fn create(&mut self) -> u64 {
        let id = self.allocate_id();
        let mut transition = DigitalObjectTransition::new();
        transition.id = Some(id);
        self.transitions.insert(id, transition);
        id
    }

    pub fn get(&self, id: u64) -> Result<&DigitalObjectTransition, ProvenanceError> {
        self.transitions
            .get(&id)
            .ok_or(ProvenanceError::TransitionNotFound(id))
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut DigitalObjectTransition, ProvenanceError> {
        self.transitions
            .get_mut(&id)
            .ok_or(ProvenanceError::TransitionNotFound(id))
    }

    /// Bind an input (object, view) pair under the given dedup policy.
    /// Returns whether a mapping was inserted; a policy-duplicate bind is a
    /// silent no-op.
    pub fn add_input_mapping(
        &mut self,
        id: u64,
        object_id: ObjectId,
        view_name: &str,
        policy: DedupPolicy,
    ) -> Result<bool, ProvenanceError> {
        Ok(self
            .get_mut(id)?
            .add_input_mapping(object_id, view_name, policy))
    }

    /// Add an output object (set semantics).
    pub fn add_output_object(
        &mut self,
        id: u64,
        object_id: ObjectId,
    ) -> Result<bool, ProvenanceError> {
        Ok(self.get_mut(id)?.add_output_object(object_id))
    }

    pub fn set_transition_type(
        &mut self,
        id: u64,
        transition_type: TransitionType,
    ) -> Result<(), ProvenanceError> {
        self.get_mut(id)?.transition_type = transition_type;
        Ok(())
    }

    pub fn set_transition_entity_id(
        &mut self,
        id: u64,
        entity_id: impl Into<String>,
    ) -> Result<(), ProvenanceError> {
        self.get_mut(id)?.transition_entity_id = Some(entity_id.into());
        Ok(())
    }

    pub fn set_creation_timestamp(
        &mut self,
        id: u64,
        timestamp_millis: i64,
    ) -> Result<(), ProvenanceError> {
        self.get_mut(id)?.creation_timestamp = timestamp_millis;
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: u64) -> Option<DigitalObjectTransition> {
        self.transitions.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Iterate all transitions in deterministic id order.
    pub fn transitions(&self) -> impl Iterator<Item = &DigitalObjectTransition> {
        self.transitions.values()
    }
}
