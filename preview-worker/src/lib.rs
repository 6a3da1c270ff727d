#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod comments;
pub mod exec;
pub mod gallery;
pub mod git;
pub mod manifest;
pub mod pulls;
pub mod recovery;
pub mod runner;
pub mod summary;

pub use comments::{
    deployment_comment_body, has_bot_comment, post_deployment_comment, CommentError, CommentStatus,
};
pub use exec::{run_command, CommandOutput, CommandSpec, ExecError};
pub use gallery::{
    build_gallery, DeployTarget, ExampleLink, GalleryError, GalleryReport, PageRenderer,
};
pub use git::GitError;
pub use manifest::{
    load_manifest, manifest_path_for, ExampleManifest, ManifestError, UsageExample,
    PROG_PLACEHOLDER,
};
pub use pulls::{
    list_open_pull_requests, resolve_mergeable, should_deploy, DiscoveryError, PullRequestRecord,
};
pub use recovery::{recover_repository, RecoveryError};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::{ProcessingResult, RunSummary};
