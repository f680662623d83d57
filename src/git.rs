use std::path::{Path, PathBuf};
use std::process::Command;

/// Error from a git invocation.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// git ran and exited non-zero; carries its captured stderr.
    #[error("Git command failed: {0}")]
    Failed(String),
    /// git could not be started at all.
    #[error("Git command failed: could not run git: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Runs git subcommands and returns their stdout.
///
/// The driver only talks to git through this trait, so decision tests can
/// substitute a recording fake for the real binary.
pub trait GitRunner {
    fn run(&self, args: &[&str]) -> Result<String, GitError>;
}

/// Runs the `git` binary found on `PATH` in a fixed working directory.
///
/// Blocking, no timeout: the caller that spawned the hook owns the deadline.
#[derive(Debug, Clone)]
pub struct GitCli {
    cwd: PathBuf,
}

impl GitCli {
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        GitCli {
            cwd: cwd.as_ref().to_path_buf(),
        }
    }
}

impl GitRunner for GitCli {
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        tracing::debug!(?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.cwd)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::debug!(status = ?output.status.code(), %stderr, "git failed");
            return Err(GitError::Failed(stderr));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// `true` when `git status --porcelain` output lists a staged entry.
///
/// The first column is the index status; ` ` means unchanged in the index
/// and `?`/`!` mark untracked or ignored files.
pub(crate) fn has_staged_entries(porcelain: &str) -> bool {
    porcelain
        .lines()
        .filter_map(|line| line.chars().next())
        .any(|index| !matches!(index, ' ' | '?' | '!'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_modification_counts() {
        assert!(has_staged_entries("M  src/app.py\n"));
    }

    #[test]
    fn staged_addition_counts() {
        assert!(has_staged_entries("A  src/new.rs\n?? scratch.txt\n"));
    }

    #[test]
    fn unstaged_and_untracked_do_not_count() {
        assert!(!has_staged_entries(" M README.md\n?? claude-tool-events.log\n"));
    }

    #[test]
    fn empty_status_has_no_changes() {
        assert!(!has_staged_entries(""));
        assert!(!has_staged_entries("\n"));
    }

    #[test]
    fn failed_error_carries_stderr() {
        let err = GitError::Failed("fatal: not a git repository\n".to_string());
        assert_eq!(
            err.to_string(),
            "Git command failed: fatal: not a git repository\n"
        );
    }
}
