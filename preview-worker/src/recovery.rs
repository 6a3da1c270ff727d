//! Repository recovery after a failed branch operation.

use crate::git::{self, GitError};
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors that abort the whole run.
///
/// A working tree that cannot be cleaned, reset, or returned to master would
/// poison every pull request handled after it, so these three steps are
/// fatal. Failing to delete the working branch is not: the stale branch is
/// only a naming collision risk for the next scheduled run.
#[derive(Debug, Error)]
pub enum RecoveryError {
    /// `git clean -xdf` failed.
    #[error("Fatal, could not clean the repository: {0}")]
    CleanFailed(#[source] GitError),

    /// `git reset --hard HEAD` failed.
    #[error("Fatal, could not reset to the current HEAD: {0}")]
    ResetFailed(#[source] GitError),

    /// `git checkout -f master` failed.
    #[error("Fatal, could not force back to master: {0}")]
    CheckoutFailed(#[source] GitError),
}

/// Forces the repository back to a clean checkout of master.
///
/// Invoked after any branch operation fails while deploying pull request
/// `pull_number`. Steps, in strict order: remove untracked files, hard-reset
/// to HEAD, force-checkout master, delete the `pull_<id>` working branch.
///
/// # Errors
///
/// Returns [`RecoveryError`] if any of the first three steps fails; the
/// caller must treat this as fatal to the run. Branch-deletion failure is
/// logged and swallowed.
pub async fn recover_repository(
    reason: &str,
    repo: &Path,
    pull_number: u64,
) -> Result<(), RecoveryError> {
    warn!(pull_number, "{reason}");
    info!("Cleaning the repository");

    if let Err(e) = git::clean_untracked(repo).await {
        error!(error = %e, "Could not clean the repository");
        return Err(RecoveryError::CleanFailed(e));
    }

    if let Err(e) = git::reset_hard(repo).await {
        error!(error = %e, "Could not reset to the current HEAD");
        return Err(RecoveryError::ResetFailed(e));
    }

    if let Err(e) = git::checkout_master_forced(repo).await {
        error!(error = %e, "Could not force back to master");
        return Err(RecoveryError::CheckoutFailed(e));
    }

    let branch = format!("pull_{pull_number}");
    if let Err(e) = git::delete_branch(repo, &branch).await {
        error!(branch, error = %e, "Could not delete the branch");
    }

    Ok(())
}
