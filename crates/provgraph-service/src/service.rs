//! Boundary operations: validate requests, delegate to the lineage store,
//! answer with wire-shaped records.

use crate::record::TransitionRecord;
use crate::request::{AddTransitionRequest, AddTransitionSetRequest};
use provgraph_core::{ObjectId, ProvenanceError, TransitionType};
use provgraph_store::LineageStore;

fn parse_type(
    transition_type: Option<&str>,
    type_data: Option<&str>,
) -> Result<(TransitionType, Option<String>), ProvenanceError> {
    let transition_type = transition_type
        .map(TransitionType::from_tag)
        .unwrap_or_default();
    if !transition_type.is_none() && type_data.is_none() {
        return Err(ProvenanceError::invalid(format!(
            "transition type '{transition_type}' requires type data"
        )));
    }
    Ok((transition_type, type_data.map(str::to_string)))
}

/// Add a 1:1 transition (single form).
pub fn add_transition(
    store: &mut LineageStore,
    request: &AddTransitionRequest,
) -> Result<TransitionRecord, ProvenanceError> {
    let (transition_type, type_data) =
        parse_type(request.transition_type.as_deref(), request.type_data.as_deref())?;

    let object = ObjectId::new(request.input_object_id.as_str())?;
    let other = ObjectId::new(request.other_object_id.as_str())?;
    let output = request
        .output_object_id
        .as_deref()
        .map(ObjectId::new)
        .transpose()?;

    let id = store.create_single_transition(
        &object,
        &other,
        request.view_name.as_deref(),
        output.as_ref(),
        transition_type,
        type_data.as_deref(),
    )?;
    Ok(TransitionRecord::from_transition(store.transitions().get(id)?))
}

/// Add an n:n transition.
pub fn add_transition_set(
    store: &mut LineageStore,
    request: &AddTransitionSetRequest,
) -> Result<TransitionRecord, ProvenanceError> {
    if request.input_object_view_map.is_empty() {
        return Err(ProvenanceError::invalid(
            "inputObjectViewMap must be non-empty",
        ));
    }
    if request.output_objects.is_empty() {
        return Err(ProvenanceError::invalid("outputObjects must be non-empty"));
    }
    let (transition_type, type_data) =
        parse_type(request.transition_type.as_deref(), request.type_data.as_deref())?;

    let mut inputs = Vec::with_capacity(request.input_object_view_map.len());
    for (object_id, view_name) in &request.input_object_view_map {
        inputs.push((ObjectId::new(object_id.as_str())?, view_name.clone()));
    }
    let mut outputs = Vec::with_capacity(request.output_objects.len());
    for object_id in &request.output_objects {
        outputs.push(ObjectId::new(object_id.as_str())?);
    }

    let id = store.create_transition(&inputs, &outputs, transition_type, type_data.as_deref())?;
    Ok(TransitionRecord::from_transition(store.transitions().get(id)?))
}

/// Get one transition by id.
pub fn get_transition(
    store: &LineageStore,
    id: u64,
) -> Result<TransitionRecord, ProvenanceError> {
    Ok(TransitionRecord::from_transition(store.transitions().get(id)?))
}

/// Transitions that produced the object (upstream lineage).
pub fn derived_from(
    store: &LineageStore,
    object_id: &str,
) -> Result<Vec<TransitionRecord>, ProvenanceError> {
    let object_id = ObjectId::new(object_id)?;
    store.objects().lookup(object_id.as_str())?;
    Ok(store
        .derived_from(&object_id)
        .into_iter()
        .map(TransitionRecord::from_transition)
        .collect())
}

/// Transitions that consumed the object as an input (downstream lineage).
pub fn contributes_to(
    store: &LineageStore,
    object_id: &str,
) -> Result<Vec<TransitionRecord>, ProvenanceError> {
    let object_id = ObjectId::new(object_id)?;
    store.objects().lookup(object_id.as_str())?;
    Ok(store
        .contributes_to(&object_id)
        .into_iter()
        .map(TransitionRecord::from_transition)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn store_with_objects(ids: &[&str]) -> LineageStore {
        let mut store = LineageStore::new();
        for id in ids {
            store
                .objects_mut()
                .create(Some(id))
                .expect("object must register");
        }
        store
    }

    fn set_request(
        inputs: &[(&str, &str)],
        outputs: &[&str],
        transition_type: Option<&str>,
        type_data: Option<&str>,
    ) -> AddTransitionSetRequest {
        AddTransitionSetRequest {
            input_object_view_map: inputs
                .iter()
                .map(|(id, view)| (id.to_string(), view.to_string()))
                .collect::<BTreeMap<_, _>>(),
            output_objects: outputs.iter().map(|id| id.to_string()).collect(),
            transition_type: transition_type.map(str::to_string),
            type_data: type_data.map(str::to_string),
        }
    }

    #[test]
    fn set_form_round_trips_through_the_store() {
        let mut store = store_with_objects(&["a", "b", "c"]);
        let record = add_transition_set(
            &mut store,
            &set_request(&[("a", "default"), ("b", "reduced")], &["c"], None, None),
        )
        .expect("n:n transition must create");

        assert_eq!(record.transition_type, "NONE");
        assert_eq!(record.input_object_view_mappings.len(), 2);
        assert_eq!(record.output_objects, vec!["c"]);

        let derived = derived_from(&store, "c").expect("query must succeed");
        assert_eq!(derived, vec![record.clone()]);
        let contributed = contributes_to(&store, "a").expect("query must succeed");
        assert_eq!(contributed, vec![record]);
    }

    #[test]
    fn empty_sets_fail_at_the_boundary() {
        let mut store = store_with_objects(&["a", "c"]);

        let err = add_transition_set(&mut store, &set_request(&[], &["c"], None, None))
            .expect_err("empty inputs must fail");
        assert!(matches!(err, ProvenanceError::InvalidArgument { .. }));

        let err = add_transition_set(&mut store, &set_request(&[("a", "v")], &[], None, None))
            .expect_err("empty outputs must fail");
        assert!(matches!(err, ProvenanceError::InvalidArgument { .. }));
    }

    #[test]
    fn typed_request_without_payload_fails() {
        let mut store = store_with_objects(&["a", "c"]);

        let err = add_transition_set(
            &mut store,
            &set_request(&[("a", "v")], &["c"], Some("DATAWORKFLOW"), None),
        )
        .expect_err("typed request without payload must fail");
        assert!(matches!(err, ProvenanceError::InvalidArgument { .. }));

        let record = add_transition_set(
            &mut store,
            &set_request(&[("a", "v")], &["c"], Some("DATAWORKFLOW"), Some("task-7")),
        )
        .expect("typed request with payload must succeed");
        assert_eq!(record.transition_type, "DATAWORKFLOW");
        assert_eq!(record.transition_entity_id.as_deref(), Some("task-7"));
    }

    #[test]
    fn entity_reference_payload_binds_the_referenced_id() {
        let mut store = store_with_objects(&["a", "c"]);
        let record = add_transition_set(
            &mut store,
            &set_request(
                &[("a", "v")],
                &["c"],
                Some("ELASTICSEARCH"),
                Some(r#"{"transitionEntityId":"es-1"}"#),
            ),
        )
        .expect("typed request with entity reference must succeed");
        assert_eq!(record.transition_entity_id.as_deref(), Some("es-1"));
        assert!(store.find_by_entity_id("es-1").is_some());
    }

    #[test]
    fn single_form_validates_output_against_participants() {
        let mut store = store_with_objects(&["x", "y"]);

        let record = add_transition(
            &mut store,
            &AddTransitionRequest {
                input_object_id: "x".to_string(),
                other_object_id: "y".to_string(),
                view_name: None,
                output_object_id: None,
                transition_type: None,
                type_data: None,
            },
        )
        .expect("single transition must create");
        assert_eq!(record.output_objects, vec!["y"]);
        assert_eq!(record.input_object_view_mappings[0].object_id, "x");
        assert_eq!(record.input_object_view_mappings[0].view_name, "default");

        let err = add_transition(
            &mut store,
            &AddTransitionRequest {
                input_object_id: "x".to_string(),
                other_object_id: "y".to_string(),
                view_name: None,
                output_object_id: Some("stranger".to_string()),
                transition_type: None,
                type_data: None,
            },
        )
        .expect_err("foreign output must fail");
        assert!(matches!(err, ProvenanceError::InvalidArgument { .. }));
    }

    #[test]
    fn lineage_queries_reject_unknown_objects() {
        let store = store_with_objects(&["a"]);
        assert!(matches!(
            derived_from(&store, "missing"),
            Err(ProvenanceError::ObjectNotFound(_))
        ));
        assert!(matches!(
            contributes_to(&store, "missing"),
            Err(ProvenanceError::ObjectNotFound(_))
        ));
    }

    #[test]
    fn get_transition_misses_surface_not_found() {
        let store = LineageStore::new();
        assert!(matches!(
            get_transition(&store, 12),
            Err(ProvenanceError::TransitionNotFound(12))
        ));
    }
}
