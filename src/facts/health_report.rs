use crate::facts::hosting::{ActivityRecord, CommunityHealthRecord, RepoRecord};
use crate::facts::registry::{DownloadRecord, PackageRecord};
use crate::ratings::HealthRatings;
use chrono::{DateTime, Utc};
use core::fmt::{Display, Formatter};
use serde::{Serialize, Serializer};
use strum::Display as StrumDisplay;

/// Identifies which part of a report could not be filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorTag {
    NpmMetadataError,
    NpmDownloadsError,
    GithubRepoError,
    GithubHealthError,
    GithubActivityError,
    NoGithubRepository,
}

/// A tagged partial failure, rendered as `tag` or `tag: detail`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportError {
    pub tag: ErrorTag,
    pub detail: Option<String>,
}

impl ReportError {
    #[must_use]
    pub fn new(tag: ErrorTag, detail: impl Display) -> Self {
        Self {
            tag,
            detail: Some(detail.to_string()),
        }
    }

    #[must_use]
    pub const fn bare(tag: ErrorTag) -> Self {
        Self { tag, detail: None }
    }
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {detail}", self.tag),
            None => write!(f, "{}", self.tag),
        }
    }
}

impl Serialize for ReportError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The three hosting facets; each is absent when its lookup failed or never ran
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GithubData {
    pub repo: Option<RepoRecord>,
    pub health: Option<CommunityHealthRecord>,
    pub activity: Option<ActivityRecord>,
}

/// Everything known about a package's health
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub package_name: String,
    pub retrieved_at: DateTime<Utc>,
    pub npm_data: Option<PackageRecord>,
    pub downloads_data: Option<DownloadRecord>,
    pub github_data: GithubData,
    pub health_ratings: HealthRatings,

    /// `true` exactly when the registry metadata was obtained
    pub success: bool,

    pub errors: Vec<ReportError>,
}

impl HealthReport {
    /// Whether a failure with the given tag was recorded
    #[must_use]
    pub fn has_error(&self, tag: ErrorTag) -> bool {
        self.errors.iter().any(|e| e.tag == tag)
    }
}
