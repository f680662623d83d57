// Shared test helpers for integration tests.
// Used by cli_contract.rs and cli_flows.rs.
#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::{NamedTempFile, TempDir};

pub fn binary_path() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_auto-commit-hook"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

/// Output of one binary run.
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl RunOutput {
    /// Parses stdout as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(self.stdout.trim()).expect("stdout should be valid JSON")
    }
}

/// Runs the binary in `cwd` with the given stdin and args.
///
/// Git is kept from discovering repositories above `cwd` and from picking
/// up a repository named by the caller's environment.
pub fn run_in(cwd: &Path, stdin_input: &str, args: &[&str]) -> RunOutput {
    let ceiling = cwd.parent().unwrap_or(cwd);
    let output = Command::new(binary_path())
        .args(args)
        .current_dir(cwd)
        .env("GIT_CEILING_DIRECTORIES", ceiling)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .env_remove("GIT_INDEX_FILE")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            use std::io::ErrorKind;
            let write_result = child
                .stdin
                .take()
                .unwrap()
                .write_all(stdin_input.as_bytes());
            if let Err(e) = write_result {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e);
                }
            }
            child.wait_with_output()
        })
        .expect("failed to execute binary");

    RunOutput {
        stdout: String::from_utf8(output.stdout).expect("stdout not valid UTF-8"),
        stderr: String::from_utf8(output.stderr).expect("stderr not valid UTF-8"),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

/// Runs `hook` in `cwd` with no config file present.
pub fn run_hook(cwd: &Path, stdin_input: &str) -> RunOutput {
    let absent = cwd.join(".absent-auto-commit-config.json");
    run_in(cwd, stdin_input, &["hook", "--config", absent.to_str().unwrap()])
}

/// Runs `hook` in `cwd` with `config_content` as the config file.
pub fn run_hook_with_config(cwd: &Path, stdin_input: &str, config_content: &str) -> RunOutput {
    let config = config_file(config_content);
    run_in(
        cwd,
        stdin_input,
        &["hook", "--config", config.path().to_str().unwrap()],
    )
}

/// Writes `content` to a temporary config file outside any test repository.
pub fn config_file(content: &str) -> NamedTempFile {
    let mut tmpfile = NamedTempFile::new().expect("failed to create temp config");
    tmpfile
        .write_all(content.as_bytes())
        .expect("failed to write config");
    tmpfile
}

pub fn event_json(tool_name: &str, file_path: &str) -> String {
    serde_json::json!({
        "session_id": "abc123",
        "transcript_path": "/tmp/transcript.json",
        "hook_event_name": "PostToolUse",
        "tool_name": tool_name,
        "tool_input": {"file_path": file_path}
    })
    .to_string()
}

/// Runs git in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let ceiling = dir.parent().unwrap_or(dir);
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_CEILING_DIRECTORIES", ceiling)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .env_remove("GIT_INDEX_FILE")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("git output not valid UTF-8")
}

/// A fresh repository on branch `main` with one commit of `README.md`.
pub fn git_repo() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path();

    git(path, &["init", "--quiet"]);
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "commit.gpgsign", "false"]);

    std::fs::write(path.join("README.md"), "# Test Repository\n").unwrap();
    git(path, &["add", "README.md"]);
    git(path, &["commit", "--quiet", "-m", "Initial commit"]);

    dir
}

pub fn write_file(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

pub fn commit_count(dir: &Path) -> usize {
    git(dir, &["rev-list", "--count", "HEAD"])
        .trim()
        .parse()
        .expect("rev-list count should be a number")
}
