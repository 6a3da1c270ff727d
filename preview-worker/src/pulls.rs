//! Open pull-request discovery.
//!
//! Retrieves the complete paginated list of open pull requests and resolves
//! each one's mergeability with a follow-up request. Any API failure here
//! aborts the run: deploying from a partial list would leave stale previews
//! in place without explanation.

use octocrab::models::pulls::PullRequest;
use octocrab::{params, Octocrab};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

/// Results per page when listing pull requests.
const RESULTS_PER_PAGE: u8 = 100;

/// Errors that can occur during pull-request discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),
}

/// One open pull request, as much of it as the worker needs.
///
/// Sourced fresh from the API each run, never cached.
#[derive(Debug, Clone)]
pub struct PullRequestRecord {
    /// Pull request number.
    pub number: u64,
    /// Host-reported mergeability; `None` while the host is still computing
    /// it.
    pub mergeable: Option<bool>,
    /// Git URL of the contributor's repository.
    pub source_repo_url: Url,
    /// Branch name in the contributor's repository.
    pub source_ref: String,
}

/// Lists every open pull request, following pagination to exhaustion.
///
/// Pull requests whose head repository is gone (deleted fork) are skipped
/// with a warning; there is nothing to fetch from.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if the initial or any subsequent page request
/// fails.
pub async fn list_open_pull_requests(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
) -> Result<Vec<PullRequestRecord>, DiscoveryError> {
    info!(owner, repo, "Fetching open pull requests");

    let mut records = Vec::new();

    let mut page = octocrab
        .pulls(owner, repo)
        .list()
        .state(params::State::Open)
        .per_page(RESULTS_PER_PAGE)
        .send()
        .await?;

    collect_records(&page.items, &mut records);

    // Follow the link-relation header until there is no next page.
    while let Some(next_page) = octocrab.get_page::<PullRequest>(&page.next).await? {
        debug!(fetched = records.len(), "Fetching next pull-request page");
        collect_records(&next_page.items, &mut records);
        page.next = next_page.next;

        if page.next.is_none() {
            break;
        }
    }

    info!(count = records.len(), "Discovery complete");
    Ok(records)
}

/// Resolves the current mergeability of one pull request.
///
/// The list endpoint does not include `mergeable`; a per-PR request does.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if the request fails.
pub async fn resolve_mergeable(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<Option<bool>, DiscoveryError> {
    let pull = octocrab.pulls(owner, repo).get(number).await?;
    Ok(pull.mergeable)
}

/// Maps raw API records into [`PullRequestRecord`]s, dropping unusable ones.
fn collect_records(items: &[PullRequest], records: &mut Vec<PullRequestRecord>) {
    for pull in items {
        let source_repo_url = pull
            .head
            .repo
            .as_ref()
            .and_then(|repo| repo.git_url.clone());

        match source_repo_url {
            Some(url) => records.push(PullRequestRecord {
                number: pull.number,
                mergeable: pull.mergeable,
                source_repo_url: url,
                source_ref: pull.head.ref_field.clone(),
            }),
            None => {
                warn!(
                    number = pull.number,
                    "Pull request has no reachable source repository, skipping"
                );
            }
        }
    }
}

/// Deployment policy for the mergeability tri-state.
///
/// `Some(false)` is the only state that blocks deployment; a pull request
/// whose mergeability the host has not finished computing is still deployed.
#[must_use]
pub fn should_deploy(mergeable: Option<bool>) -> bool {
    mergeable != Some(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmergeable_pull_requests_are_not_deployed() {
        assert!(!should_deploy(Some(false)));
    }

    #[test]
    fn mergeable_pull_requests_are_deployed() {
        assert!(should_deploy(Some(true)));
    }

    #[test]
    fn pending_mergeability_is_still_deployed() {
        assert!(should_deploy(None));
    }
}
