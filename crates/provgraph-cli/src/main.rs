//! Provgraph CLI: the `provgraph` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Object { command } => commands::object::run(command),

        Commands::Transition { command } => commands::transition::run(command),

        Commands::DerivedFrom {
            object_id,
            store,
            dedup,
            json,
        } => commands::lineage::run_derived_from(object_id, store, dedup, json),

        Commands::ContributesTo {
            object_id,
            store,
            dedup,
            json,
        } => commands::lineage::run_contributes_to(object_id, store, dedup, json),
    }
}
