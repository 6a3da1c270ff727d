//! Deployment target identity.

/// Which branch a gallery build is published for.
///
/// Carries the directory name and heading link explicitly; nothing is parsed
/// back out of filesystem paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployTarget {
    /// The main branch build.
    Master,
    /// The build for one open pull request.
    PullRequest(u64),
}

impl DeployTarget {
    /// Directory name under the deploy root: `master` or `pull_<id>`.
    #[must_use]
    pub fn dir_name(&self) -> String {
        match self {
            Self::Master => "master".to_string(),
            Self::PullRequest(number) => format!("pull_{number}"),
        }
    }

    /// Label shown in the index-page heading.
    #[must_use]
    pub fn label(&self) -> String {
        self.dir_name()
    }

    /// Source-tree URL the index-page heading links to.
    #[must_use]
    pub fn source_url(&self, tree_url: &str) -> String {
        match self {
            Self::Master => format!("{tree_url}/tree/master"),
            Self::PullRequest(number) => format!("{tree_url}/pull/{number}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_names_and_links() {
        let target = DeployTarget::Master;
        assert_eq!(target.dir_name(), "master");
        assert_eq!(
            target.source_url("https://github.com/qiime/emperor"),
            "https://github.com/qiime/emperor/tree/master"
        );
    }

    #[test]
    fn pull_request_names_and_links() {
        let target = DeployTarget::PullRequest(42);
        assert_eq!(target.dir_name(), "pull_42");
        assert_eq!(target.label(), "pull_42");
        assert_eq!(
            target.source_url("https://github.com/qiime/emperor"),
            "https://github.com/qiime/emperor/pull/42"
        );
    }
}
