use super::Repository;
use crate::facts::time_utils::{parse_timestamp, whole_days_between};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest gap since the last push for a repository to still count as maintained
const MAINTAINED_WITHIN_DAYS: u64 = 365;

/// Popularity and upkeep facts for a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub stars: u64,
    pub forks: u64,

    /// Timestamp of the most recent push, as GitHub reported it
    pub last_code_push: Option<String>,

    pub is_archived: bool,

    /// Not archived and pushed to within the last year
    pub is_maintained: bool,
}

impl RepoRecord {
    #[must_use]
    pub fn from_repository(repo: &Repository, now: DateTime<Utc>) -> Self {
        let is_archived = repo.archived.unwrap_or(false);
        let pushed_recently = repo
            .pushed_at
            .as_deref()
            .and_then(parse_timestamp)
            .is_some_and(|pushed| whole_days_between(pushed, now) <= MAINTAINED_WITHIN_DAYS);

        Self {
            stars: repo.stargazers_count.unwrap_or(0),
            forks: repo.forks_count.unwrap_or(0),
            last_code_push: repo.pushed_at.clone(),
            is_archived,
            is_maintained: !is_archived && pushed_recently,
        }
    }
}
