use std::path::Path;

use serde_json::{Map, Value};

/// Execute the config subcommand: print the effective config as pretty JSON.
///
/// Resolution errors are rendered as miette diagnostics on stderr (exit 1).
pub fn run(config_path: Option<&Path>, overrides: Option<&Map<String, Value>>) -> i32 {
    let config = match super::resolve_config(config_path, overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            return 1;
        }
    };

    match serde_json::to_string_pretty(&config) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}
