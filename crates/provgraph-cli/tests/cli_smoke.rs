use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "provgraph-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn store_path(&self) -> String {
        self.path.join("store.jsonl").display().to_string()
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_provgraph<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_provgraph");
    Command::new(bin)
        .args(args)
        .output()
        .expect("provgraph command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected valid JSON stdout, got error: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn add_object(store: &str, id: &str) {
    let output = run_provgraph(["object", "add", "--id", id, "--store", store]);
    assert_success(&output);
}

#[test]
fn object_add_list_hide_round_trip() {
    let tmp = TempDirGuard::new("objects");
    let store = tmp.store_path();

    let output = run_provgraph([
        "object", "add", "--id", "obj-a", "--label", "raw image", "--store", &store, "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["action"], "object.add");
    assert_eq!(payload["object"]["objectId"], "obj-a");
    assert_eq!(payload["object"]["label"], "raw image");
    assert_eq!(payload["object"]["visible"], true);

    add_object(&store, "obj-b");

    // Duplicate registration must fail.
    let output = run_provgraph(["object", "add", "--id", "obj-a", "--store", &store]);
    assert_failure(&output);

    let output = run_provgraph(["object", "hide", "obj-a", "--store", &store]);
    assert_success(&output);

    let output = run_provgraph(["object", "list", "--store", &store, "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["objects"][0]["objectId"], "obj-b");

    let output = run_provgraph(["object", "list", "--all", "--store", &store, "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["count"], 2);
}

#[test]
fn object_add_generates_an_id_when_omitted() {
    let tmp = TempDirGuard::new("generated");
    let store = tmp.store_path();

    let output = run_provgraph(["object", "add", "--store", &store, "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    let generated = payload["object"]["objectId"]
        .as_str()
        .expect("objectId should be a string");
    assert!(!generated.trim().is_empty());
}

#[test]
fn transition_add_and_lineage_queries() {
    let tmp = TempDirGuard::new("lineage");
    let store = tmp.store_path();
    for id in ["obj-a", "obj-b", "obj-c"] {
        add_object(&store, id);
    }

    let output = run_provgraph([
        "transition", "add",
        "--input", "obj-a",
        "--input", "obj-b:reduced",
        "--output", "obj-c",
        "--store", &store,
        "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["action"], "transition.add");
    let transition = &payload["transition"];
    assert_eq!(transition["id"], 1);
    assert_eq!(transition["transitionType"], "NONE");
    assert_eq!(transition["outputObjects"][0], "obj-c");
    assert_eq!(
        transition["inputObjectViewMappings"][0]["viewName"],
        "default"
    );

    let output = run_provgraph(["derived-from", "obj-c", "--store", &store, "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["transitions"].as_array().map(Vec::len), Some(1));
    assert_eq!(payload["transitions"][0]["id"], 1);

    let output = run_provgraph(["contributes-to", "obj-b", "--store", &store, "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["transitions"][0]["id"], 1);

    // Nothing flows downstream of the output.
    let output = run_provgraph(["contributes-to", "obj-c", "--store", &store, "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["transitions"].as_array().map(Vec::len), Some(0));

    let output = run_provgraph(["transition", "get", "1", "--store", &store, "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["transition"]["id"], 1);

    let output = run_provgraph(["transition", "get", "42", "--store", &store]);
    assert_failure(&output);
}

#[test]
fn transition_link_defaults_counterpart_as_output() {
    let tmp = TempDirGuard::new("link");
    let store = tmp.store_path();
    add_object(&store, "obj-in");
    add_object(&store, "obj-out");

    let output = run_provgraph([
        "transition", "link", "obj-in", "obj-out", "--store", &store, "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    let transition = &payload["transition"];
    assert_eq!(transition["outputObjects"][0], "obj-out");
    assert_eq!(
        transition["inputObjectViewMappings"][0]["objectId"],
        "obj-in"
    );

    // A designated output outside the pair is rejected.
    let output = run_provgraph([
        "transition", "link", "obj-in", "obj-out", "--output", "stranger", "--store", &store,
    ]);
    assert_failure(&output);
}

#[test]
fn typed_transition_requires_type_data() {
    let tmp = TempDirGuard::new("typed");
    let store = tmp.store_path();
    add_object(&store, "obj-a");
    add_object(&store, "obj-b");

    let output = run_provgraph([
        "transition", "add",
        "--input", "obj-a",
        "--output", "obj-b",
        "--type", "DATAWORKFLOW",
        "--store", &store,
    ]);
    assert_failure(&output);

    let output = run_provgraph([
        "transition", "add",
        "--input", "obj-a",
        "--output", "obj-b",
        "--type", "DATAWORKFLOW",
        "--type-data", "task-7",
        "--store", &store,
        "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["transition"]["transitionType"], "DATAWORKFLOW");
    assert_eq!(payload["transition"]["transitionEntityId"], "task-7");
}

#[test]
fn transition_add_rejects_unregistered_objects() {
    let tmp = TempDirGuard::new("unregistered");
    let store = tmp.store_path();
    add_object(&store, "obj-a");

    let output = run_provgraph([
        "transition", "add",
        "--input", "obj-a",
        "--output", "obj-ghost",
        "--store", &store,
    ]);
    assert_failure(&output);
}

#[test]
fn lineage_queries_require_an_existing_store() {
    let tmp = TempDirGuard::new("missing-store");
    let store = tmp.path().join("nope.jsonl").display().to_string();

    let output = run_provgraph(["derived-from", "obj-a", "--store", &store]);
    assert_failure(&output);
    let output = run_provgraph(["object", "list", "--store", &store]);
    assert_failure(&output);
}
