use clap::{Parser, Subcommand, ValueEnum};
use provgraph_core::DedupPolicy;

pub const DEFAULT_STORE_PATH: &str = ".provgraph/store.jsonl";

#[derive(Parser)]
#[command(
    name = "provgraph",
    about = "Provgraph: derivation graph over digital objects and typed transitions",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage registered digital objects
    Object {
        #[command(subcommand)]
        command: ObjectCommands,
    },

    /// Manage transitions between digital objects
    Transition {
        #[command(subcommand)]
        command: TransitionCommands,
    },

    /// List transitions that produced the object (upstream lineage)
    DerivedFrom {
        /// External object identifier
        object_id: String,

        /// Path to the store JSONL
        #[arg(long, default_value = DEFAULT_STORE_PATH)]
        store: String,

        /// Input-dedup policy applied when the store is loaded
        #[arg(long, value_enum, default_value_t = DedupArg::ByObject)]
        dedup: DedupArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List transitions the object contributed to as an input (downstream lineage)
    ContributesTo {
        /// External object identifier
        object_id: String,

        /// Path to the store JSONL
        #[arg(long, default_value = DEFAULT_STORE_PATH)]
        store: String,

        /// Input-dedup policy applied when the store is loaded
        #[arg(long, value_enum, default_value_t = DedupArg::ByObject)]
        dedup: DedupArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ObjectCommands {
    /// Register a digital object
    Add {
        /// External object identifier; omit to generate a UUID
        #[arg(long)]
        id: Option<String>,

        /// Human-readable label
        #[arg(long)]
        label: Option<String>,

        /// Free-text note
        #[arg(long)]
        note: Option<String>,

        /// Path to the store JSONL
        #[arg(long, default_value = DEFAULT_STORE_PATH)]
        store: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered objects
    List {
        /// Include objects marked invisible
        #[arg(long)]
        all: bool,

        /// Path to the store JSONL
        #[arg(long, default_value = DEFAULT_STORE_PATH)]
        store: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark an object invisible without removing its lineage
    Hide {
        /// External object identifier
        object_id: String,

        /// Path to the store JSONL
        #[arg(long, default_value = DEFAULT_STORE_PATH)]
        store: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum TransitionCommands {
    /// Create an n:n transition from input bindings to output objects
    Add {
        /// Input binding as `objectId` or `objectId:viewName` (repeatable)
        #[arg(long = "input", required = true)]
        inputs: Vec<String>,

        /// Output object identifier (repeatable)
        #[arg(long = "output", required = true)]
        outputs: Vec<String>,

        /// Transition type tag (defaults to the untyped sentinel)
        #[arg(long = "type")]
        transition_type: Option<String>,

        /// Type payload naming the external entity
        #[arg(long)]
        type_data: Option<String>,

        /// Path to the store JSONL
        #[arg(long, default_value = DEFAULT_STORE_PATH)]
        store: String,

        /// Input-dedup policy applied when the store is loaded
        #[arg(long, value_enum, default_value_t = DedupArg::ByObject)]
        dedup: DedupArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a 1:1 transition between two objects (single form)
    Link {
        /// Input-side object identifier
        object_id: String,

        /// Counterpart object identifier
        other_object_id: String,

        /// View name bound on the input side
        #[arg(long)]
        view: Option<String>,

        /// Designated output; must equal one of the two objects
        #[arg(long)]
        output: Option<String>,

        /// Transition type tag (defaults to the untyped sentinel)
        #[arg(long = "type")]
        transition_type: Option<String>,

        /// Type payload naming the external entity
        #[arg(long)]
        type_data: Option<String>,

        /// Path to the store JSONL
        #[arg(long, default_value = DEFAULT_STORE_PATH)]
        store: String,

        /// Input-dedup policy applied when the store is loaded
        #[arg(long, value_enum, default_value_t = DedupArg::ByObject)]
        dedup: DedupArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one transition by numeric id
    Get {
        /// Transition id
        id: u64,

        /// Path to the store JSONL
        #[arg(long, default_value = DEFAULT_STORE_PATH)]
        store: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DedupArg {
    /// Deduplicate input bindings by object identity only
    ByObject,
    /// Deduplicate input bindings by object and view
    ByObjectAndView,
}

impl From<DedupArg> for DedupPolicy {
    fn from(arg: DedupArg) -> Self {
        match arg {
            DedupArg::ByObject => DedupPolicy::ByObject,
            DedupArg::ByObjectAndView => DedupPolicy::ByObjectAndView,
        }
    }
}
