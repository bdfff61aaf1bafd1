//! Data collection and aggregation for npm packages
//!
//! Facts about a package come from three independent sources:
//! - **Registry metadata**: latest version, license, size, release history, maintainers
//! - **Download statistics**: daily download counts folded into weekly buckets
//! - **Repository hosting**: GitHub popularity, community files, issue and pull request activity
//!
//! Each source is queried over HTTP by a dedicated client and normalized into a flat
//! record. The [`Collector`] runs the lookups concurrently, wraps every outcome in a
//! [`ProviderResult`] so one failing source never sinks the others, and merges the
//! survivors into a [`HealthReport`] along with the ratings computed from them.

mod collector;
mod health_report;
pub mod hosting;
mod provider_result;
pub mod registry;
mod repo_spec;
pub(crate) mod time_utils;

pub use collector::{CollectError, Collector};
pub use health_report::{ErrorTag, GithubData, HealthReport, ReportError};
pub use provider_result::ProviderResult;
pub use repo_spec::RepoSpec;
