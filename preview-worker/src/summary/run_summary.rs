//! Run summary types.

use super::result::ProcessingResult;
use crate::comments::CommentStatus;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Open pull requests discovered.
    pub pulls_discovered: usize,

    /// Pull requests whose preview was built and published.
    pub deployed: usize,

    /// Pull requests skipped (not mergeable, unusable source).
    pub skipped: usize,

    /// Pull requests abandoned after a branch failure and recovery.
    pub recovered: usize,

    /// Deployment comments posted.
    pub comments_posted: usize,

    /// Deployment comments skipped because the bot already commented.
    pub comments_skipped: usize,

    /// Deployment comments that failed to post.
    pub comments_failed: usize,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &ProcessingResult) {
        match result {
            ProcessingResult::Deployed { comment, .. } => {
                self.deployed += 1;
                match comment {
                    Some(CommentStatus::Posted { .. }) => self.comments_posted += 1,
                    Some(CommentStatus::Skipped { .. }) => self.comments_skipped += 1,
                    None => self.comments_failed += 1,
                }
            }
            ProcessingResult::Skipped { .. } => self.skipped += 1,
            ProcessingResult::Recovered { .. } => self.recovered += 1,
        }
    }

    /// Returns true if every discovered pull request was deployed cleanly.
    #[must_use]
    pub fn all_deployed(&self) -> bool {
        self.recovered == 0 && self.comments_failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_deployed_with_posted_comment() {
        let mut summary = RunSummary::new();

        summary.record_result(&ProcessingResult::Deployed {
            number: 42,
            comment: Some(CommentStatus::Posted {
                url: "https://example.com".to_string(),
            }),
        });

        assert_eq!(summary.deployed, 1);
        assert_eq!(summary.comments_posted, 1);
        assert!(summary.all_deployed());
    }

    #[test]
    fn records_skip_and_recovery() {
        let mut summary = RunSummary::new();

        summary.record_result(&ProcessingResult::Skipped {
            number: 7,
            reason: "not mergeable".to_string(),
        });
        summary.record_result(&ProcessingResult::Recovered {
            number: 8,
            reason: "could not pull down the custom branch".to_string(),
        });

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.recovered, 1);
        assert!(!summary.all_deployed());
    }

    #[test]
    fn failed_comment_counts_against_clean_run() {
        let mut summary = RunSummary::new();

        summary.record_result(&ProcessingResult::Deployed {
            number: 42,
            comment: None,
        });

        assert_eq!(summary.comments_failed, 1);
        assert!(!summary.all_deployed());
    }
}
