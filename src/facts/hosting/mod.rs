//! GitHub repository facts
//!
//! Three independent facets are gathered for a repository: basic popularity and
//! upkeep ([`RepoRecord`]), presence of community files ([`CommunityHealthRecord`]),
//! and issue and pull request activity ([`ActivityRecord`]). The [`HostingClient`]
//! fetches each facet; a failure in one never affects the others.

mod activity_record;
mod client;
mod community_record;
mod error;
mod repo_record;
mod time_difference;

pub use activity_record::ActivityRecord;
pub use client::{CommunityProfile, HostingClient, PullRequest, Repository, SearchItem, SearchResults};
pub use community_record::CommunityHealthRecord;
pub use error::HostingError;
pub use repo_record::RepoRecord;
pub use time_difference::{TimeDifference, format_time_difference};

const LOG_TARGET: &str = "   hosting";
