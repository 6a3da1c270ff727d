//! Git operations over the command runner.
//!
//! Each helper takes the repository path explicitly; nothing here changes the
//! process working directory. Non-zero exits are converted to
//! [`GitError::CommandFailed`] carrying the combined output so callers can
//! log it.

use crate::exec::{run_command, CommandSpec, ExecError};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors from git invocations.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be executed.
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// Git ran and exited non-zero.
    #[error("git {command} failed: {output}")]
    CommandFailed {
        /// The git subcommand and arguments.
        command: String,
        /// Combined stdout and stderr of the failed command.
        output: String,
    },
}

/// Runs `git <args>` in `repo`, treating a non-zero exit as an error.
async fn run_git(repo: &Path, args: &[&str]) -> Result<(), GitError> {
    let mut argv = vec!["git".to_string()];
    argv.extend(args.iter().map(ToString::to_string));

    let output = run_command(&CommandSpec::Argv(argv), repo).await?;
    if !output.success() {
        return Err(GitError::CommandFailed {
            command: args.join(" "),
            output: output.combined(),
        });
    }
    Ok(())
}

/// Pulls `refspec` from `remote` into the currently checked-out branch.
pub async fn pull(repo: &Path, remote: &str, refspec: &str) -> Result<(), GitError> {
    debug!(remote, refspec, "git pull");
    run_git(repo, &["pull", remote, refspec]).await
}

/// Creates and checks out a new local branch.
pub async fn checkout_new_branch(repo: &Path, branch: &str) -> Result<(), GitError> {
    debug!(branch, "git checkout -b");
    run_git(repo, &["checkout", "-b", branch]).await
}

/// Force-checks-out the master branch, discarding tracked modifications.
pub async fn checkout_master_forced(repo: &Path) -> Result<(), GitError> {
    debug!("git checkout -f master");
    run_git(repo, &["checkout", "-f", "master"]).await
}

/// Deletes a local branch regardless of its merge state.
pub async fn delete_branch(repo: &Path, branch: &str) -> Result<(), GitError> {
    debug!(branch, "git branch -D");
    run_git(repo, &["branch", "-D", branch]).await
}

/// Removes untracked files and directories, ignored files included.
pub async fn clean_untracked(repo: &Path) -> Result<(), GitError> {
    debug!("git clean -xdf");
    run_git(repo, &["clean", "-xdf"]).await
}

/// Resets the working tree to the current HEAD.
pub async fn reset_hard(repo: &Path) -> Result<(), GitError> {
    debug!("git reset --hard HEAD");
    run_git(repo, &["reset", "--hard", "HEAD"]).await
}
