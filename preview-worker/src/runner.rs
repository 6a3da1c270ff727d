//! Orchestrates one full deployment run.
//!
//! A run refreshes the master branch, rebuilds its gallery, then walks every
//! open pull request strictly in discovery order: branch, fetch, build,
//! publish, tear down, comment. Any branch failure triggers repository
//! recovery and skips to the next pull request; master is the ground state
//! the worker always returns to.

mod config;
mod error;

pub use config::{
    RunnerConfig, DEFAULT_BOT_LOGIN, DEFAULT_OWNER, DEFAULT_PREVIEW_BASE_URL, DEFAULT_REPO,
    DEFAULT_SCRIPT_REL_PATH, DEFAULT_SOURCE_TREE_URL, DEFAULT_UPSTREAM_URL,
};
pub use error::RunnerError;

use crate::comments::post_deployment_comment;
use crate::gallery::{build_gallery, DeployTarget};
use crate::git;
use crate::pulls::{list_open_pull_requests, resolve_mergeable, should_deploy, PullRequestRecord};
use crate::recovery::recover_repository;
use crate::summary::{ProcessingResult, RunSummary};
use octocrab::Octocrab;
use std::path::Path;
use tracing::{debug, error, info};

/// Orchestrates a full deployment run.
pub struct Runner {
    config: RunnerConfig,
    octocrab: Octocrab,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let octocrab = Octocrab::builder()
            .personal_token(config.token().to_string())
            .build()?;
        Ok(Self { config, octocrab })
    }

    /// Executes the full orchestration flow.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] on a fatal condition: master refresh or
    /// master gallery failure, API connectivity failure, or a failed
    /// recovery. Per-pull-request problems are recorded in the summary
    /// instead.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new();
        let repo = self.config.repo_path();

        info!(remote = %self.config.upstream_url(), "Refreshing the master branch");
        if let Err(e) = git::pull(repo, self.config.upstream_url(), "master").await {
            error!(error = %e, "Could not pull from master, not continuing");
            return Err(e.into());
        }

        let script = self.config.script_path();
        build_gallery(
            &script,
            self.config.master_path(),
            DeployTarget::Master,
            self.config.source_tree_url(),
        )
        .await?;

        let pulls =
            list_open_pull_requests(&self.octocrab, self.config.owner(), self.config.repo())
                .await?;
        summary.pulls_discovered = pulls.len();

        if pulls.is_empty() {
            info!("There are no active pull requests to deploy");
            return Ok(summary);
        }

        for pull in &pulls {
            let result = self.deploy_pull_request(pull).await?;
            summary.record_result(&result);
        }

        Ok(summary)
    }

    /// Runs the deployment state machine for one pull request.
    ///
    /// Returns `Err` only for fatal conditions (API failure, failed
    /// recovery); everything else becomes a [`ProcessingResult`].
    async fn deploy_pull_request(
        &self,
        pull: &PullRequestRecord,
    ) -> Result<ProcessingResult, RunnerError> {
        let number = pull.number;
        let repo = self.config.repo_path();

        info!(number, "Checking pull request");
        let mergeable =
            resolve_mergeable(&self.octocrab, self.config.owner(), self.config.repo(), number)
                .await?;

        if !should_deploy(mergeable) {
            info!(number, "Ignoring, not mergeable");
            return Ok(ProcessingResult::Skipped {
                number,
                reason: "not mergeable".to_string(),
            });
        }
        if mergeable.is_none() {
            debug!(number, "Mergeability still pending, deploying anyway");
        }

        let branch = DeployTarget::PullRequest(number).dir_name();
        info!(number, url = %pull.source_repo_url, branch = %pull.source_ref, "Active pull request");

        if let Err(e) = git::checkout_new_branch(repo, &branch).await {
            error!(number, error = %e, "Branch creation failed");
            recover_repository("could not checkout a new branch", repo, number).await?;
            return Ok(ProcessingResult::Recovered {
                number,
                reason: "could not checkout a new branch".to_string(),
            });
        }

        if let Err(e) = git::pull(repo, pull.source_repo_url.as_str(), &pull.source_ref).await {
            error!(number, error = %e, "Fetching the contributor branch failed");
            recover_repository("could not pull down the custom branch", repo, number).await?;
            return Ok(ProcessingResult::Recovered {
                number,
                reason: "could not pull down the custom branch".to_string(),
            });
        }

        if let Err(e) = self.publish_preview(number).await {
            error!(number, error = %e, "Building the example gallery failed");
            recover_repository("could not build the example gallery", repo, number).await?;
            return Ok(ProcessingResult::Recovered {
                number,
                reason: "could not build the example gallery".to_string(),
            });
        }

        if let Err(e) = git::checkout_master_forced(repo).await {
            error!(number, error = %e, "Could not check out master again");
            recover_repository("could not check out master again", repo, number).await?;
            return Ok(ProcessingResult::Recovered {
                number,
                reason: "could not check out master again".to_string(),
            });
        }

        info!(number, branch = %branch, "Deleting the working branch");
        if let Err(e) = git::delete_branch(repo, &branch).await {
            error!(number, error = %e, "Could not delete the branch");
        }

        let comment = match post_deployment_comment(
            &self.octocrab,
            self.config.owner(),
            self.config.repo(),
            number,
            self.config.preview_base_url(),
            &self.config.module_name(),
            self.config.bot_login(),
        )
        .await
        {
            Ok(status) => {
                info!(number, status = status.as_str(), "Comment handled");
                Some(status)
            }
            Err(e) => {
                error!(number, error = %e, "Could not post the deployment comment");
                None
            }
        };

        Ok(ProcessingResult::Deployed { number, comment })
    }

    /// Builds the pull request's gallery into a staging directory and swaps
    /// it into place.
    ///
    /// The stale `pull_<id>` directory is removed only after a successful
    /// build, so a concurrent reader of the served tree never sees a
    /// half-built gallery.
    async fn publish_preview(&self, number: u64) -> Result<(), RunnerError> {
        let target = DeployTarget::PullRequest(number);
        let deploy_root = self.config.deploy_root();
        let final_dir = deploy_root.join(target.dir_name());

        let io_err = |path: &Path, e: std::io::Error| RunnerError::Io {
            path: path.display().to_string(),
            source: e,
        };

        let staging = tempfile::Builder::new()
            .prefix(&format!(".{}-", target.dir_name()))
            .tempdir_in(deploy_root)
            .map_err(|e| io_err(deploy_root, e))?;

        info!(number, folder = %final_dir.display(), "Folder where the pull request will be deployed");
        build_gallery(
            &self.config.script_path(),
            staging.path(),
            target,
            self.config.source_tree_url(),
        )
        .await?;

        match std::fs::remove_dir_all(&final_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(io_err(&final_dir, e)),
        }

        let staged = staging.keep();
        std::fs::rename(&staged, &final_dir).map_err(|e| io_err(&staged, e))?;

        Ok(())
    }
}
