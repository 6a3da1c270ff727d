//! Runner error types.

/// Fatal errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Git failures that are fatal at the top level (master refresh).
    #[error(transparent)]
    Git(#[from] crate::git::GitError),

    /// Pull-request discovery failures.
    #[error(transparent)]
    Discovery(#[from] crate::pulls::DiscoveryError),

    /// Master gallery build failures.
    #[error(transparent)]
    Gallery(#[from] crate::gallery::GalleryError),

    /// A recovery step failed; the working tree can no longer be trusted.
    #[error(transparent)]
    Recovery(#[from] crate::recovery::RecoveryError),

    /// Filesystem failure while publishing a deployment directory.
    #[error("Deployment I/O failure at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
