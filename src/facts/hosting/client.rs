//! GitHub API client
//!
//! Minimal GitHub API client for repository, community profile, search and pull request data.

use super::{ActivityRecord, HostingError, LOG_TARGET};
use crate::facts::RepoSpec;
use core::time::Duration;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub pushed_at: Option<String>,
    pub archived: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommunityProfile {
    pub health_percentage: Option<u64>,

    /// Known community file kinds; absent ones are present as `null`
    #[serde(default)]
    pub files: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub total_count: u64,

    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub number: u64,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequest {
    pub created_at: Option<String>,
    pub merged_at: Option<String>,
}

/// GitHub API client
#[derive(Debug, Clone)]
pub struct HostingClient {
    client: reqwest::Client,
    base_url: String,
}

impl HostingClient {
    /// Create a new client with an optional bearer token
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the HTTP client cannot be built
    pub fn new(token: Option<&str>, base_url: impl Into<String>, user_agent: &str, timeout: Duration) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        let _ = headers.insert("x-github-api-version", HeaderValue::from_static(GITHUB_API_VERSION));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("Bearer {t}"))?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Get the base URL for this client
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the repository resource
    pub async fn fetch_repository(&self, repo: &RepoSpec) -> Result<Repository, HostingError> {
        let url = self.endpoint(&["repos", repo.owner(), repo.repo()])?;
        self.get_json(url, &format!("repository '{repo}'")).await
    }

    /// Fetch the community profile resource
    pub async fn fetch_community_profile(&self, repo: &RepoSpec) -> Result<CommunityProfile, HostingError> {
        let url = self.endpoint(&["repos", repo.owner(), repo.repo(), "community", "profile"])?;
        self.get_json(url, &format!("community profile for '{repo}'")).await
    }

    /// Fetch a single pull request by number
    pub async fn fetch_pull_request(&self, repo: &RepoSpec, number: u64) -> Result<PullRequest, HostingError> {
        let number = number.to_string();
        let url = self.endpoint(&["repos", repo.owner(), repo.repo(), "pulls", &number])?;
        self.get_json(url, &format!("pull request #{number} for '{repo}'")).await
    }

    /// Run an issue search; `extra` carries sort and paging parameters
    pub async fn search_issues(&self, query: &str, extra: &[(&str, &str)]) -> Result<SearchResults, HostingError> {
        let mut url = self.endpoint(&["search", "issues"])?;
        let _ = url.query_pairs_mut().append_pair("q", query).extend_pairs(extra);
        self.get_json(url, &format!("search results for '{query}'")).await
    }

    /// Gather issue totals and the most recently merged pull request
    ///
    /// The issue searches and the pull request lookup run concurrently; any failing
    /// request fails the whole facet.
    pub async fn fetch_activity(&self, repo: &RepoSpec) -> Result<ActivityRecord, HostingError> {
        let (issues, last_pr) = tokio::join!(self.issue_counts(repo), self.last_merged_pull_request(repo));
        let (open, closed) = issues?;
        let last_pr = last_pr?;

        Ok(ActivityRecord::from_parts(open, closed, last_pr.as_ref().map(|(item, pr)| (item, pr))))
    }

    async fn issue_counts(&self, repo: &RepoSpec) -> Result<(u64, u64), HostingError> {
        let open_query = format!("repo:{repo} is:issue is:open");
        let closed_query = format!("repo:{repo} is:issue is:closed");

        let (open, closed) = tokio::join!(self.search_issues(&open_query, &[]), self.search_issues(&closed_query, &[]));
        Ok((open?.total_count, closed?.total_count))
    }

    async fn last_merged_pull_request(&self, repo: &RepoSpec) -> Result<Option<(SearchItem, PullRequest)>, HostingError> {
        let query = format!("repo:{repo} is:pr is:merged");
        let results = self
            .search_issues(&query, &[("sort", "updated"), ("order", "desc"), ("per_page", "1")])
            .await?;

        let Some(item) = results.items.into_iter().next() else {
            log::debug!(target: LOG_TARGET, "No merged pull requests found for '{repo}'");
            return Ok(None);
        };

        let pr = self.fetch_pull_request(repo, item.number).await?;
        Ok(Some((item, pr)))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, HostingError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| HostingError::Api(format!("invalid GitHub API base URL '{}': {e}", self.base_url)))?;

        let _ = url
            .path_segments_mut()
            .map_err(|()| HostingError::Api(format!("GitHub API base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, HostingError> {
        log::debug!(target: LOG_TARGET, "Fetching {what} from {url}");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HostingError::Api(format!("could not fetch {what}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HostingError::from_status(status, &body, what));
        }

        resp.json::<T>()
            .await
            .map_err(|e| HostingError::Api(format!("could not decode {what}: {e}")))
    }
}
