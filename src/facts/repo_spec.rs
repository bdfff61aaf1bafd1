use core::fmt::{Display, Formatter};
use regex::Regex;
use std::sync::{Arc, LazyLock};

static GITHUB_REPO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/]+)/([^/]+)").expect("invalid GitHub repository regex"));

/// A GitHub repository identified by owner and name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    #[must_use]
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: Arc::from(owner),
            repo: Arc::from(repo),
        }
    }

    /// Extract the GitHub owner and repository from a repository URL
    ///
    /// The first `github.com/<owner>/<repo>` occurrence wins, with a trailing `.git`
    /// removed from the repository segment. Returns `None` for URLs that do not point
    /// at GitHub.
    #[must_use]
    pub fn parse(url: &str) -> Option<Self> {
        let captures = GITHUB_REPO_REGEX.captures(url)?;
        let owner = captures.get(1)?.as_str();
        let repo = captures.get(2)?.as_str();
        let repo = repo.strip_suffix(".git").unwrap_or(repo);

        if repo.is_empty() {
            return None;
        }

        Some(Self::new(owner, repo))
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
