//! Comment posting status types.

use serde::Serialize;

/// Outcome of one comment-posting attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommentStatus {
    /// A new comment was created.
    Posted {
        /// URL of the created comment.
        url: String,
    },

    /// The bot already commented on this pull request, nothing was posted.
    Skipped {
        /// Reason for skipping.
        reason: String,
    },
}

impl CommentStatus {
    /// Returns the status as a string for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Posted { .. } => "posted",
            Self::Skipped { .. } => "skipped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_status_to_string() {
        assert_eq!(
            CommentStatus::Posted {
                url: "https://example.com".to_string()
            }
            .as_str(),
            "posted"
        );
        assert_eq!(
            CommentStatus::Skipped {
                reason: "test".to_string()
            }
            .as_str(),
            "skipped"
        );
    }
}
