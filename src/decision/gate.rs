use std::collections::BTreeSet;
use std::path::Path;

use crate::git::{has_staged_entries, GitRunner};

/// Whether git recognizes the working directory as part of a repository.
/// Any failure, including git being absent, means "no".
pub(crate) fn is_git_repository(git: &dyn GitRunner) -> bool {
    git.run(&["rev-parse", "--git-dir"]).is_ok()
}

/// Whether the checked-out branch is one of `restrictions`.
///
/// Only asks git when the set is non-empty. A failed query, as on a detached
/// HEAD in very old git versions, counts as not restricted.
pub(crate) fn is_branch_restricted(git: &dyn GitRunner, restrictions: &BTreeSet<String>) -> bool {
    if restrictions.is_empty() {
        return false;
    }
    match git.run(&["branch", "--show-current"]) {
        Ok(branch) => restrictions.contains(branch.trim()),
        Err(e) => {
            tracing::debug!(error = %e, "branch query failed, treating as unrestricted");
            false
        }
    }
}

/// Whether the index holds anything to commit. A failed query counts as
/// nothing to commit.
pub(crate) fn has_changes_to_commit(git: &dyn GitRunner) -> bool {
    match git.run(&["status", "--porcelain"]) {
        Ok(status) => has_staged_entries(&status),
        Err(e) => {
            tracing::debug!(error = %e, "status query failed, treating as clean");
            false
        }
    }
}

/// Whether `file_path`, resolved against `cwd` when relative, exists.
pub(crate) fn file_exists(file_path: &str, cwd: &Path) -> bool {
    cwd.join(file_path).exists()
}
