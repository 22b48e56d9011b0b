use provgraph_core::DedupPolicy;
use provgraph_service::TransitionRecord;
use provgraph_store::LineageStore;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Load the store from `store_arg`, or start empty when the file does not
/// exist yet. Exits the process on a corrupt or unreadable snapshot.
pub fn load_store_or_empty_or_exit(store_arg: &str, dedup: DedupPolicy) -> (LineageStore, PathBuf) {
    let path = PathBuf::from(store_arg);
    if !path.exists() {
        return (LineageStore::with_dedup_policy(dedup), path);
    }
    let store = LineageStore::load_jsonl(&path, dedup).unwrap_or_else(|e| {
        eprintln!("error: failed to load {}: {e}", path.display());
        std::process::exit(1);
    });
    (store, path)
}

/// Load the store, exiting when the file does not exist. Read-only commands
/// use this so that a missing store surfaces as an error instead of an
/// empty result set.
pub fn load_store_existing_or_exit(
    store_arg: &str,
    dedup: DedupPolicy,
) -> (LineageStore, PathBuf) {
    let path = PathBuf::from(store_arg);
    if !path.exists() {
        eprintln!("error: store file not found: {}", path.display());
        std::process::exit(1);
    }
    let store = LineageStore::load_jsonl(&path, dedup).unwrap_or_else(|e| {
        eprintln!("error: failed to load {}: {e}", path.display());
        std::process::exit(1);
    });
    (store, path)
}

pub fn save_store_or_exit(store: &LineageStore, path: &Path) {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).unwrap_or_else(|e| {
            eprintln!("error: failed to create {}: {e}", parent.display());
            std::process::exit(1);
        });
    }
    store.save_jsonl(path).unwrap_or_else(|e| {
        eprintln!("error: failed to save {}: {e}", path.display());
        std::process::exit(1);
    });
}

/// Parse an `--input` binding of the form `objectId` or `objectId:viewName`.
pub fn parse_input_binding(raw: &str) -> (String, Option<String>) {
    match raw.split_once(':') {
        Some((object_id, view)) if !view.is_empty() => {
            (object_id.to_string(), Some(view.to_string()))
        }
        Some((object_id, _)) => (object_id.to_string(), None),
        None => (raw.to_string(), None),
    }
}

pub fn print_json(payload: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).expect("json serialization")
    );
}

pub fn transition_payload(record: &TransitionRecord) -> Value {
    serde_json::to_value(record).expect("record serialization")
}

pub fn print_transition_text(record: &TransitionRecord) {
    println!("  Transition: {} [{}]", record.id, record.transition_type);
    if let Some(entity_id) = &record.transition_entity_id {
        println!("  Entity: {entity_id}");
    }
    println!("  Created: {}", record.creation_timestamp);
    for mapping in &record.input_object_view_mappings {
        println!("  Input: {} (view {})", mapping.object_id, mapping.view_name);
    }
    for output in &record.output_objects {
        println!("  Output: {output}");
    }
}

pub fn lineage_payload(action: &str, object_id: &str, records: &[TransitionRecord]) -> Value {
    json!({
        "action": action,
        "objectId": object_id,
        "transitions": records
            .iter()
            .map(transition_payload)
            .collect::<Vec<_>>(),
    })
}
