//! Runner configuration.

use std::path::{Path, PathBuf};

/// Default GitHub organization the worker polls.
pub const DEFAULT_OWNER: &str = "biocore";
/// Default repository name.
pub const DEFAULT_REPO: &str = "emperor";
/// Default remote the master branch is pulled from.
pub const DEFAULT_UPSTREAM_URL: &str = "git://github.com/qiime/emperor.git";
/// Default entry-point script, relative to the repository clone.
pub const DEFAULT_SCRIPT_REL_PATH: &str = "scripts/make_emperor.py";
/// Default source tree the index-page headings link to.
pub const DEFAULT_SOURCE_TREE_URL: &str = "https://github.com/qiime/emperor";
/// Default base URL where deployed galleries are served.
pub const DEFAULT_PREVIEW_BASE_URL: &str = "http://emperor.microbio.me";
/// Default bot account that posts deployment comments.
pub const DEFAULT_BOT_LOGIN: &str = "emperor-helper";

/// Configuration for running the preview worker.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the local repository clone.
    repo_path: PathBuf,
    /// Path to the master branch's deployment directory.
    master_path: PathBuf,
    /// GitHub token used for API calls.
    token: String,
    /// Repository owner on the host.
    owner: String,
    /// Repository name on the host.
    repo: String,
    /// Remote URL the master branch is pulled from.
    upstream_url: String,
    /// Entry-point script, relative to the clone.
    script_rel_path: PathBuf,
    /// Source tree URL for index-page headings.
    source_tree_url: String,
    /// Base URL where deployed galleries are served.
    preview_base_url: String,
    /// Bot account whose comments make posting idempotent.
    bot_login: String,
}

impl RunnerConfig {
    /// Creates a configuration for a run with the project defaults.
    pub fn new(repo_path: PathBuf, master_path: PathBuf, token: String) -> Self {
        Self {
            repo_path,
            master_path,
            token,
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            script_rel_path: PathBuf::from(DEFAULT_SCRIPT_REL_PATH),
            source_tree_url: DEFAULT_SOURCE_TREE_URL.to_string(),
            preview_base_url: DEFAULT_PREVIEW_BASE_URL.to_string(),
            bot_login: DEFAULT_BOT_LOGIN.to_string(),
        }
    }

    /// Sets the repository polled on the host.
    pub fn with_github_repo(mut self, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        self.owner = owner.into();
        self.repo = repo.into();
        self
    }

    /// Sets the remote the master branch is pulled from.
    pub fn with_upstream_url(mut self, upstream_url: impl Into<String>) -> Self {
        self.upstream_url = upstream_url.into();
        self
    }

    /// Sets the entry-point script path, relative to the clone.
    pub fn with_script_rel_path(mut self, script_rel_path: PathBuf) -> Self {
        self.script_rel_path = script_rel_path;
        self
    }

    /// Sets the source tree URL used in index-page headings.
    pub fn with_source_tree_url(mut self, source_tree_url: impl Into<String>) -> Self {
        self.source_tree_url = source_tree_url.into();
        self
    }

    /// Sets the base URL where deployed galleries are served.
    pub fn with_preview_base_url(mut self, preview_base_url: impl Into<String>) -> Self {
        self.preview_base_url = preview_base_url.into();
        self
    }

    /// Sets the bot account used for idempotent comment posting.
    pub fn with_bot_login(mut self, bot_login: impl Into<String>) -> Self {
        self.bot_login = bot_login.into();
        self
    }

    /// Returns the repository clone path.
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Returns the master deployment directory.
    pub fn master_path(&self) -> &Path {
        &self.master_path
    }

    /// Returns the directory pull-request previews are deployed under
    /// (the parent of the master deployment directory).
    pub fn deploy_root(&self) -> &Path {
        self.master_path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the master branch's remote URL.
    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    /// Returns the absolute entry-point script path.
    pub fn script_path(&self) -> PathBuf {
        self.repo_path.join(&self.script_rel_path)
    }

    /// Returns the module name, the file stem of the entry-point script.
    pub fn module_name(&self) -> String {
        self.script_rel_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Returns the source tree URL.
    pub fn source_tree_url(&self) -> &str {
        &self.source_tree_url
    }

    /// Returns the preview base URL.
    pub fn preview_base_url(&self) -> &str {
        &self.preview_base_url
    }

    /// Returns the comment bot's login.
    pub fn bot_login(&self) -> &str {
        &self.bot_login
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunnerConfig {
        RunnerConfig::new(
            PathBuf::from("/srv/emperor"),
            PathBuf::from("/var/www/html/master"),
            "token".to_string(),
        )
    }

    #[test]
    fn deploy_root_is_master_parent() {
        assert_eq!(sample().deploy_root(), Path::new("/var/www/html"));
    }

    #[test]
    fn script_path_is_joined_to_clone() {
        assert_eq!(
            sample().script_path(),
            PathBuf::from("/srv/emperor/scripts/make_emperor.py")
        );
    }

    #[test]
    fn module_name_is_script_stem() {
        assert_eq!(sample().module_name(), "make_emperor");
    }

    #[test]
    fn builders_override_defaults() {
        let config = sample()
            .with_github_repo("acme", "widgets")
            .with_bot_login("widget-bot");

        assert_eq!(config.owner(), "acme");
        assert_eq!(config.repo(), "widgets");
        assert_eq!(config.bot_login(), "widget-bot");
    }
}
