//! Processing result types.

use crate::comments::CommentStatus;

/// Result of handling a single pull request.
#[derive(Debug, Clone)]
pub enum ProcessingResult {
    /// The preview was built and published.
    Deployed {
        /// Pull request number.
        number: u64,
        /// Comment outcome; `None` when posting failed.
        comment: Option<CommentStatus>,
    },

    /// The pull request was not touched.
    Skipped {
        /// Pull request number.
        number: u64,
        /// Reason for skipping.
        reason: String,
    },

    /// A branch operation failed and the repository was recovered.
    Recovered {
        /// Pull request number.
        number: u64,
        /// What went wrong.
        reason: String,
    },
}
