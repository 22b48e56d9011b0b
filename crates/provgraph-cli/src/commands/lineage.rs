use crate::cli::DedupArg;
use crate::support::{
    lineage_payload, load_store_existing_or_exit, print_json, print_transition_text,
};
use provgraph_service::TransitionRecord;

pub fn run_derived_from(object_id: String, store: String, dedup: DedupArg, json: bool) {
    run_query("derived-from", object_id, store, dedup, json, |store, id| {
        provgraph_service::derived_from(store, id)
    })
}

pub fn run_contributes_to(object_id: String, store: String, dedup: DedupArg, json: bool) {
    run_query(
        "contributes-to",
        object_id,
        store,
        dedup,
        json,
        |store, id| provgraph_service::contributes_to(store, id),
    )
}

fn run_query<F>(
    action: &str,
    object_id: String,
    store_arg: String,
    dedup: DedupArg,
    json_output: bool,
    query: F,
) where
    F: Fn(
        &provgraph_store::LineageStore,
        &str,
    ) -> Result<Vec<TransitionRecord>, provgraph_core::ProvenanceError>,
{
    let (store, _path) = load_store_existing_or_exit(&store_arg, dedup.into());

    let records = query(&store, &object_id).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        print_json(&lineage_payload(action, &object_id, &records));
    } else {
        println!(
            "provgraph {action} {object_id} ({} transitions)",
            records.len()
        );
        for record in &records {
            print_transition_text(record);
        }
    }
}
