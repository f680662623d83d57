pub mod completion;
pub mod config;
pub mod decision;
pub mod event_log;
pub mod git;
pub mod protocol;

pub(crate) mod cli;
pub(crate) mod domain;
pub(crate) mod path;

use serde_json::{Map, Value};
use std::path::Path;

/// Run the hook subcommand: read the tool event from stdin, commit, report.
///
/// Returns the process exit code. This bridges the binary crate (`main.rs`)
/// to the library without exposing `cli` internals; integrations should use
/// [`decision::evaluate`] and [`config::Config`] directly.
pub fn run_hook(config_path: Option<&Path>, overrides: Option<&Map<String, Value>>) -> i32 {
    cli::hook::run(config_path, overrides)
}

/// Run the config subcommand: print the effective configuration.
pub fn show_config(config_path: Option<&Path>, overrides: Option<&Map<String, Value>>) -> i32 {
    cli::config::run(config_path, overrides)
}
