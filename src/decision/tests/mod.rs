mod result;

use std::cell::RefCell;
use std::path::Path;

use crate::config::Config;
use crate::git::{GitError, GitRunner};
use crate::protocol::ToolEvent;
use serde_json::json;

/// Scripted stand-in for git that records every invocation.
struct FakeGit {
    in_repo: bool,
    branch: Result<String, String>,
    status: Result<String, String>,
    add_error: Option<String>,
    commit_error: Option<String>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl Default for FakeGit {
    fn default() -> Self {
        FakeGit {
            in_repo: true,
            branch: Ok("feature\n".to_string()),
            status: Ok("M  src/app.py\n".to_string()),
            add_error: None,
            commit_error: None,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeGit {
    fn subcommands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c[0].clone()).collect()
    }

    fn ran(&self, subcommand: &str) -> bool {
        self.subcommands().iter().any(|s| s == subcommand)
    }
}

impl GitRunner for FakeGit {
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        self.calls
            .borrow_mut()
            .push(args.iter().map(|a| a.to_string()).collect());
        let fail = |stderr: &str| Err(GitError::Failed(stderr.to_string()));
        match args[0] {
            "rev-parse" if self.in_repo => Ok(".git\n".to_string()),
            "rev-parse" => fail("fatal: not a git repository"),
            "branch" => self.branch.clone().or_else(|e| fail(&e)),
            "status" => self.status.clone().or_else(|e| fail(&e)),
            "add" => match &self.add_error {
                Some(e) => fail(e),
                None => Ok(String::new()),
            },
            "commit" => match &self.commit_error {
                Some(e) => fail(e),
                None => Ok("[feature abc1234] Auto-commit\n".to_string()),
            },
            other => panic!("unexpected git subcommand: {other}"),
        }
    }
}

/// A working directory that contains `src/app.py`, `.env` and `notes.log`.
fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    for file in ["src/app.py", ".env", "notes.log"] {
        std::fs::write(dir.path().join(file), "content\n").unwrap();
    }
    dir
}

fn edit_event(file_path: &str) -> ToolEvent {
    ToolEvent::from_value(json!({
        "tool_name": "Edit",
        "tool_input": {"file_path": file_path},
        "session_id": "abc123"
    }))
    .expect("test event should parse")
}

fn config_with(overrides: serde_json::Value) -> Config {
    let serde_json::Value::Object(overrides) = overrides else {
        panic!("overrides must be an object");
    };
    Config::resolve(None, Some(&overrides)).expect("test config should resolve")
}

fn run(event: &ToolEvent, config: &Config, git: &FakeGit, cwd: &Path) -> super::CommitDecision {
    super::evaluate(event, config, git, cwd)
}
