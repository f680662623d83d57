pub mod exclusion;
mod gate;
pub mod message;

use std::path::Path;

use serde_json::json;

use crate::config::Config;
use crate::git::{GitError, GitRunner};
use crate::path::file_name;
use crate::protocol::{HookResult, ToolEvent};

use self::exclusion::ExclusionMatcher;
use self::message::{build_message, MessageContext};

pub(crate) const HOOK_NAME: &str = "auto-commit";

pub const NO_FILE_PATH: &str = "No file path found in tool input";
pub const DISABLED: &str = "Auto-commit is disabled";
pub const NOT_A_REPOSITORY: &str = "Not in a git repository, skipping commit";
pub const BRANCH_RESTRICTED: &str = "Current branch is restricted from auto-commits";
pub const NO_CHANGES: &str = "No changes to commit";

/// Outcome of one hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitDecision {
    /// The file was staged and committed with `message`.
    Committed { file_path: String, message: String },
    /// Deliberate no-op; not an error.
    Skipped { reason: String },
    /// Hard failure; surfaced on stderr.
    Failed { message: String },
}

impl CommitDecision {
    fn skipped(reason: impl Into<String>) -> Self {
        CommitDecision::Skipped {
            reason: reason.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        CommitDecision::Failed {
            message: message.into(),
        }
    }
}

impl From<CommitDecision> for HookResult {
    fn from(decision: CommitDecision) -> Self {
        match decision {
            CommitDecision::Committed { file_path, message } => HookResult::success(
                HOOK_NAME,
                Some(json!({
                    "message": format!("Successfully committed {}", file_name(&file_path)),
                    "filePath": file_path,
                    "commitMessage": message,
                })),
            ),
            CommitDecision::Skipped { reason } => {
                HookResult::success(HOOK_NAME, Some(json!({ "message": reason })))
            }
            CommitDecision::Failed { message } => HookResult::error(HOOK_NAME, message),
        }
    }
}

/// Errors that abort the commit sequence once it has started.
#[derive(Debug, thiserror::Error)]
enum CommitError {
    #[error(transparent)]
    Git(#[from] GitError),
    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Decide whether to commit the file named by `event`, and commit it.
///
/// Steps run in a fixed order and the first one that does not pass ends
/// the run: file path present → enabled → inside a repository → not
/// excluded → branch not restricted → file exists → `git add` → something
/// staged (when `skipEmptyCommits`) → `git commit`.
///
/// Git failures after the repository check become
/// [`CommitDecision::Failed`] prefixed with `Auto-commit failed:`.
pub fn evaluate(
    event: &ToolEvent,
    config: &Config,
    git: &dyn GitRunner,
    cwd: &Path,
) -> CommitDecision {
    let Some(file_path) = event.file_path() else {
        return CommitDecision::failed(NO_FILE_PATH);
    };

    if !config.enabled {
        tracing::debug!("auto-commit disabled by config");
        return CommitDecision::skipped(DISABLED);
    }

    match commit_file(event, file_path, config, git, cwd) {
        Ok(decision) => decision,
        Err(e) => CommitDecision::failed(format!("Auto-commit failed: {e}")),
    }
}

fn commit_file(
    event: &ToolEvent,
    file_path: &str,
    config: &Config,
    git: &dyn GitRunner,
    cwd: &Path,
) -> Result<CommitDecision, CommitError> {
    if !gate::is_git_repository(git) {
        return Ok(CommitDecision::skipped(NOT_A_REPOSITORY));
    }

    let matcher = ExclusionMatcher::new(config.exclude_patterns.as_slice())?;
    if let Some(pattern) = matcher.matching_pattern(file_path, &cwd.to_string_lossy()) {
        tracing::debug!(file_path, pattern, "file excluded");
        return Ok(CommitDecision::skipped(format!(
            "File excluded from auto-commit: {file_path}"
        )));
    }

    if gate::is_branch_restricted(git, &config.branch_restrictions) {
        return Ok(CommitDecision::skipped(BRANCH_RESTRICTED));
    }

    if !gate::file_exists(file_path, cwd) {
        return Ok(CommitDecision::failed(format!(
            "File does not exist: {file_path}"
        )));
    }

    git.run(&["add", "--", file_path])?;

    if config.skip_empty_commits && !gate::has_changes_to_commit(git) {
        return Ok(CommitDecision::skipped(NO_CHANGES));
    }

    let message = build_message(
        &config.commit_message_template,
        config.max_commit_message_length,
        MessageContext {
            tool_name: event.tool_name.as_deref(),
            file_path,
            session_id: event.session_id.as_deref(),
        },
    );

    git.run(&["commit", "-m", &message])?;
    tracing::debug!(file_path, "committed");

    Ok(CommitDecision::Committed {
        file_path: file_path.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests;
