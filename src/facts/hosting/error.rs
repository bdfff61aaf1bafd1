use reqwest::StatusCode;

/// Failures reported by the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostingError {
    /// The repository or the requested sub-resource does not exist
    #[error("{0} not found")]
    RepositoryNotFound(String),

    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    /// Transport failure, unexpected status, or malformed payload
    #[error("GitHub API error: {0}")]
    Api(String),
}

impl HostingError {
    /// Classify a non-success response
    ///
    /// 404 means the resource does not exist. 429, or 403 with a body mentioning the
    /// rate limit, means the caller is throttled. Everything else is a generic failure.
    #[must_use]
    pub fn from_status(status: StatusCode, body: &str, what: &str) -> Self {
        if status == StatusCode::NOT_FOUND {
            return Self::RepositoryNotFound(what.to_string());
        }

        if status == StatusCode::TOO_MANY_REQUESTS || (status == StatusCode::FORBIDDEN && body.to_ascii_lowercase().contains("rate limit")) {
            return Self::RateLimited;
        }

        Self::Api(format!("unexpected status {status} while fetching {what}"))
    }
}
