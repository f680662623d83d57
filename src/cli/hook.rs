use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

use crate::decision;
use crate::event_log::{EventLog, TOOL_EXECUTION};
use crate::git::GitCli;
use crate::protocol::{HookExit, HookResult, ToolEvent};

/// Execute the hook subcommand and return the exit code.
///
/// Stdin that is not a JSON object, an unresolvable config, or an
/// unreadable working directory end the run with exit 1 before anything is
/// logged or any git command runs. A failed log write only warns.
/// Everything after that goes through [`decision::evaluate`] and the
/// [`HookResult`] projection.
pub fn run(config_path: Option<&Path>, overrides: Option<&Map<String, Value>>) -> i32 {
    match execute(config_path, overrides) {
        Ok(exit) => emit(&exit),
        Err(e) => {
            eprintln!("Auto-commit hook error: {e}");
            1
        }
    }
}

fn execute(
    config_path: Option<&Path>,
    overrides: Option<&Map<String, Value>>,
) -> Result<HookExit, Box<dyn std::error::Error>> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let event = ToolEvent::from_json(&input)?;

    let config = super::resolve_config(config_path, overrides)?;
    let cwd = std::env::current_dir()?;

    let log = EventLog::in_dir(&cwd);
    if let Err(e) = log.append(TOOL_EXECUTION, &event) {
        eprintln!("Failed to log tool event: {e}");
    }

    let git = GitCli::new(&cwd);
    let decision = decision::evaluate(&event, &config, &git, &cwd);
    tracing::debug!(?decision, "hook finished");

    Ok(HookResult::from(decision).to_exit())
}

/// Write the projected result and hand back its exit code.
fn emit(exit: &HookExit) -> i32 {
    if let Some(stdout) = &exit.stdout {
        println!("{stdout}");
    }
    if let Some(stderr) = &exit.stderr {
        eprintln!("{stderr}");
    }
    exit.code
}
