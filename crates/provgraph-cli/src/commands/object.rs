use crate::cli::ObjectCommands;
use crate::support::{load_store_existing_or_exit, load_store_or_empty_or_exit, print_json, save_store_or_exit};
use provgraph_core::{DedupPolicy, DigitalObject};
use serde_json::json;

pub fn run(command: ObjectCommands) {
    match command {
        ObjectCommands::Add {
            id,
            label,
            note,
            store,
            json,
        } => run_add(id, label, note, store, json),

        ObjectCommands::List { all, store, json } => run_list(all, store, json),

        ObjectCommands::Hide {
            object_id,
            store,
            json,
        } => run_hide(object_id, store, json),
    }
}

fn run_add(
    id: Option<String>,
    label: Option<String>,
    note: Option<String>,
    store_arg: String,
    json_output: bool,
) {
    let (mut store, path) = load_store_or_empty_or_exit(&store_arg, DedupPolicy::default());

    let external_id = {
        let created = store
            .objects_mut()
            .create(id.as_deref())
            .unwrap_or_else(|e| {
                eprintln!("error: {e}");
                std::process::exit(1);
            });
        created.object_id.as_str().to_string()
    };
    let persisted = store
        .objects_mut()
        .describe(&external_id, label.as_deref(), note.as_deref())
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        })
        .clone();

    save_store_or_exit(&store, &path);

    if json_output {
        print_json(&json!({
            "action": "object.add",
            "storePath": path.display().to_string(),
            "object": object_row(&persisted),
        }));
    } else {
        println!(
            "provgraph object add\n  Added: {}\n  Path: {}",
            persisted.object_id,
            path.display()
        );
    }
}

fn run_list(all: bool, store_arg: String, json_output: bool) {
    let (store, path) = load_store_existing_or_exit(&store_arg, DedupPolicy::default());

    let rows: Vec<&DigitalObject> = store
        .objects()
        .objects()
        .filter(|object| all || object.visible)
        .collect();

    if json_output {
        print_json(&json!({
            "action": "object.list",
            "storePath": path.display().to_string(),
            "count": rows.len(),
            "objects": rows.iter().map(|o| object_row(o)).collect::<Vec<_>>(),
        }));
    } else {
        println!("provgraph object list ({} objects)", rows.len());
        for object in rows {
            let marker = if object.visible { "" } else { " [hidden]" };
            if object.label.is_empty() {
                println!("  {}{marker}", object.object_id);
            } else {
                println!("  {} ({}){marker}", object.object_id, object.label);
            }
        }
    }
}

fn run_hide(object_id: String, store_arg: String, json_output: bool) {
    let (mut store, path) = load_store_existing_or_exit(&store_arg, DedupPolicy::default());

    store.objects_mut().hide(&object_id).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    save_store_or_exit(&store, &path);

    if json_output {
        print_json(&json!({
            "action": "object.hide",
            "storePath": path.display().to_string(),
            "objectId": object_id,
        }));
    } else {
        println!("provgraph object hide\n  Hidden: {object_id}");
    }
}

fn object_row(object: &DigitalObject) -> serde_json::Value {
    json!({
        "objectId": object.object_id.as_str(),
        "label": object.label,
        "note": object.note,
        "visible": object.visible,
    })
}
