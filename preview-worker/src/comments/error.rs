//! Comment poster error types.

use thiserror::Error;

/// Errors that can occur while posting a deployment comment.
#[derive(Debug, Error)]
pub enum CommentError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),
}
