//! Deployment-link comments on pull requests.
//!
//! Posting is idempotent per pull request within a single bot identity: if
//! the designated bot account already commented, nothing new is posted. Two
//! overlapping runs can still double-post; a single worker instance per
//! clone is a deployment-level assumption.

mod error;
mod status;

pub use error::CommentError;
pub use status::CommentStatus;

use octocrab::models::issues::Comment;
use octocrab::Octocrab;
use tracing::{debug, info};

/// Results per page when listing comments.
const RESULTS_PER_PAGE: u8 = 100;

/// Builds the fixed deployment-link comment body.
#[must_use]
pub fn deployment_comment_body(preview_base_url: &str, number: u64, module: &str) -> String {
    format!(
        "The test build for this pull request can be found here: \
         {preview_base_url}/pull_{number}/{module}/"
    )
}

/// Whether the designated bot already commented.
#[must_use]
pub fn has_bot_comment<'a>(mut authors: impl Iterator<Item = &'a str>, bot_login: &str) -> bool {
    authors.any(|login| login == bot_login)
}

/// Posts the deployment link to a pull request's discussion thread.
///
/// Lists the existing comments first; if any was authored by `bot_login`,
/// returns [`CommentStatus::Skipped`] without posting.
///
/// # Errors
///
/// Returns [`CommentError`] if listing or posting fails.
pub async fn post_deployment_comment(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    number: u64,
    preview_base_url: &str,
    module: &str,
    bot_login: &str,
) -> Result<CommentStatus, CommentError> {
    debug!(number, "Checking for an existing bot comment");
    let authors = list_comment_authors(octocrab, owner, repo, number).await?;

    if has_bot_comment(authors.iter().map(String::as_str), bot_login) {
        info!(number, bot_login, "Bot already commented, skipping");
        return Ok(CommentStatus::Skipped {
            reason: format!("{bot_login} already commented"),
        });
    }

    let body = deployment_comment_body(preview_base_url, number, module);
    let comment = octocrab
        .issues(owner, repo)
        .create_comment(number, body)
        .await?;

    info!(number, "Posted deployment comment");
    Ok(CommentStatus::Posted {
        url: comment.html_url.to_string(),
    })
}

/// Collects the author logins of every comment on a pull request.
async fn list_comment_authors(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<Vec<String>, CommentError> {
    let mut authors = Vec::new();

    let mut page = octocrab
        .issues(owner, repo)
        .list_comments(number)
        .per_page(RESULTS_PER_PAGE)
        .send()
        .await?;

    authors.extend(page.items.iter().map(|c| c.user.login.clone()));

    while let Some(next_page) = octocrab.get_page::<Comment>(&page.next).await? {
        authors.extend(next_page.items.iter().map(|c| c.user.login.clone()));
        page.next = next_page.next;

        if page.next.is_none() {
            break;
        }
    }

    Ok(authors)
}
