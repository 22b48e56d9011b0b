use crate::cli::{DedupArg, TransitionCommands};
use crate::support::{
    load_store_existing_or_exit, load_store_or_empty_or_exit, parse_input_binding, print_json,
    print_transition_text, save_store_or_exit, transition_payload,
};
use provgraph_core::DEFAULT_VIEW;
use provgraph_service::{AddTransitionRequest, AddTransitionSetRequest, TransitionRecord};
use serde_json::json;
use std::collections::BTreeMap;

pub fn run(command: TransitionCommands) {
    match command {
        TransitionCommands::Add {
            inputs,
            outputs,
            transition_type,
            type_data,
            store,
            dedup,
            json,
        } => run_add(inputs, outputs, transition_type, type_data, store, dedup, json),

        TransitionCommands::Link {
            object_id,
            other_object_id,
            view,
            output,
            transition_type,
            type_data,
            store,
            dedup,
            json,
        } => run_link(LinkArgs {
            object_id,
            other_object_id,
            view,
            output,
            transition_type,
            type_data,
            store,
            dedup,
            json,
        }),

        TransitionCommands::Get { id, store, json } => run_get(id, store, json),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_add(
    inputs: Vec<String>,
    outputs: Vec<String>,
    transition_type: Option<String>,
    type_data: Option<String>,
    store_arg: String,
    dedup: DedupArg,
    json_output: bool,
) {
    let (mut store, path) = load_store_or_empty_or_exit(&store_arg, dedup.into());

    let mut input_object_view_map = BTreeMap::new();
    for raw in &inputs {
        let (object_id, view) = parse_input_binding(raw);
        input_object_view_map.insert(object_id, view.unwrap_or_else(|| DEFAULT_VIEW.to_string()));
    }

    let request = AddTransitionSetRequest {
        input_object_view_map,
        output_objects: outputs,
        transition_type,
        type_data,
    };
    let record = provgraph_service::add_transition_set(&mut store, &request).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    save_store_or_exit(&store, &path);

    emit("transition.add", &record, &path, json_output);
}

struct LinkArgs {
    object_id: String,
    other_object_id: String,
    view: Option<String>,
    output: Option<String>,
    transition_type: Option<String>,
    type_data: Option<String>,
    store: String,
    dedup: DedupArg,
    json: bool,
}

fn run_link(args: LinkArgs) {
    let (mut store, path) = load_store_or_empty_or_exit(&args.store, args.dedup.into());

    let request = AddTransitionRequest {
        input_object_id: args.object_id,
        other_object_id: args.other_object_id,
        view_name: args.view,
        output_object_id: args.output,
        transition_type: args.transition_type,
        type_data: args.type_data,
    };
    let record = provgraph_service::add_transition(&mut store, &request).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    save_store_or_exit(&store, &path);

    emit("transition.link", &record, &path, args.json);
}

fn run_get(id: u64, store_arg: String, json_output: bool) {
    let (store, path) = load_store_existing_or_exit(&store_arg, provgraph_core::DedupPolicy::default());

    let record = provgraph_service::get_transition(&store, id).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    emit("transition.get", &record, &path, json_output);
}

fn emit(action: &str, record: &TransitionRecord, path: &std::path::Path, json_output: bool) {
    if json_output {
        print_json(&json!({
            "action": action,
            "storePath": path.display().to_string(),
            "transition": transition_payload(record),
        }));
    } else {
        println!("provgraph {action}");
        print_transition_text(record);
    }
}
