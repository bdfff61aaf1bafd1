use crate::Result;
use crate::config::Config;
use crate::facts::hosting::{ActivityRecord, CommunityHealthRecord, HostingClient, HostingError, RepoRecord};
use crate::facts::registry::{DownloadRecord, PackageRecord, RegistryClient, RegistryError};
use crate::facts::{ErrorTag, GithubData, HealthReport, ProviderResult, RepoSpec, ReportError};
use crate::ratings::{RatingInputs, compute_ratings};
use chrono::{DateTime, Utc};
use std::sync::Arc;

const LOG_TARGET: &str = " collector";

/// The one failure that prevents a report from being produced
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectError {
    #[error("package '{0}' not found")]
    PackageNotFound(String),
}

/// Gathers facts about npm packages from the registry and GitHub
#[derive(Debug, Clone)]
pub struct Collector {
    registry: RegistryClient,
    hosting: HostingClient,
    package_page_url: Arc<str>,
}

impl Collector {
    /// Create a collector whose clients follow the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be constructed
    pub fn new(config: &Config, github_token: Option<&str>) -> Result<Self> {
        let timeout = config.request_timeout();
        let registry = RegistryClient::new(&config.registry_url, &config.downloads_url, &config.user_agent, timeout)?;
        let hosting = HostingClient::new(github_token, &config.github_api_url, &config.user_agent, timeout)?;

        Ok(Self::from_clients(registry, hosting, config.package_page_url.as_str()))
    }

    #[must_use]
    pub fn from_clients(registry: RegistryClient, hosting: HostingClient, package_page_url: &str) -> Self {
        Self {
            registry,
            hosting,
            package_page_url: Arc::from(package_page_url),
        }
    }

    /// Registry metadata for the latest version of a package
    pub async fn package_record(&self, name: &str, now: DateTime<Utc>) -> Result<PackageRecord, RegistryError> {
        let doc = self.registry.fetch_metadata(name).await?;
        PackageRecord::from_document(name, &doc, &self.package_page_url, now)
    }

    /// Weekly download trend for the 20 weeks ending at `now`
    pub async fn download_record(&self, name: &str, now: DateTime<Utc>) -> Result<DownloadRecord, RegistryError> {
        let range = self.registry.fetch_downloads(name, now).await?;
        Ok(DownloadRecord::from_daily(range.downloads))
    }

    pub async fn repo_record(&self, repo: &RepoSpec, now: DateTime<Utc>) -> Result<RepoRecord, HostingError> {
        let raw = self.hosting.fetch_repository(repo).await?;
        Ok(RepoRecord::from_repository(&raw, now))
    }

    pub async fn community_record(&self, repo: &RepoSpec) -> Result<CommunityHealthRecord, HostingError> {
        let raw = self.hosting.fetch_community_profile(repo).await?;
        Ok(CommunityHealthRecord::from_profile(&raw))
    }

    pub async fn activity_record(&self, repo: &RepoSpec) -> Result<ActivityRecord, HostingError> {
        self.hosting.fetch_activity(repo).await
    }

    /// Build the full health report for a package
    ///
    /// Registry metadata and downloads are fetched concurrently, then the three GitHub
    /// facets are fetched concurrently if the package names a GitHub repository. Every
    /// failure except a missing package is recorded in the report's `errors` and the
    /// affected section is left empty.
    ///
    /// # Errors
    ///
    /// Returns `PackageNotFound` if the registry does not know the package
    pub async fn collect(&self, name: &str, now: DateTime<Utc>) -> Result<HealthReport, CollectError> {
        log::info!(target: LOG_TARGET, "Collecting health facts for '{name}'");

        let (package, downloads) = tokio::join!(self.package_record(name, now), self.download_record(name, now));
        let mut errors = Vec::new();

        let package = match package {
            Ok(record) => Some(record),
            Err(RegistryError::PackageNotFound(_)) => {
                log::error!(target: LOG_TARGET, "Package '{name}' does not exist in the registry");
                return Err(CollectError::PackageNotFound(name.to_string()));
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Could not obtain registry metadata for '{name}': {e}");
                errors.push(ReportError::new(ErrorTag::NpmMetadataError, &e));
                None
            }
        };

        let downloads = merge(downloads.into(), ErrorTag::NpmDownloadsError, name, &mut errors);

        let repo_spec = package.as_ref().and_then(|p| RepoSpec::parse(&p.repository));
        let (repo, health, activity) = if let Some(spec) = &repo_spec {
            log::info!(target: LOG_TARGET, "Querying GitHub repository '{spec}' for '{name}'");
            self.query_hosting(spec, now).await
        } else {
            log::info!(target: LOG_TARGET, "No GitHub repository found for '{name}'");
            errors.push(ReportError::bare(ErrorTag::NoGithubRepository));
            (ProviderResult::Unavailable, ProviderResult::Unavailable, ProviderResult::Unavailable)
        };

        let github_data = GithubData {
            repo: merge(repo, ErrorTag::GithubRepoError, name, &mut errors),
            health: merge(health, ErrorTag::GithubHealthError, name, &mut errors),
            activity: merge(activity, ErrorTag::GithubActivityError, name, &mut errors),
        };

        let health_ratings = compute_ratings(
            &RatingInputs {
                package: package.as_ref(),
                downloads: downloads.as_ref(),
                github: &github_data,
            },
            now,
        );

        log::info!(target: LOG_TARGET, "Collected facts for '{name}' with {} error(s)", errors.len());

        Ok(HealthReport {
            package_name: name.to_string(),
            retrieved_at: now,
            success: package.is_some(),
            npm_data: package,
            downloads_data: downloads,
            github_data,
            health_ratings,
            errors,
        })
    }

    /// Run the three GitHub facets concurrently; each settles on its own
    async fn query_hosting(
        &self,
        repo: &RepoSpec,
        now: DateTime<Utc>,
    ) -> (ProviderResult<RepoRecord>, ProviderResult<CommunityHealthRecord>, ProviderResult<ActivityRecord>) {
        let (repo_result, health_result, activity_result) =
            tokio::join!(self.repo_record(repo, now), self.community_record(repo), self.activity_record(repo));

        (repo_result.into(), health_result.into(), activity_result.into())
    }
}

/// Keep found data; record an error under `tag` otherwise
fn merge<T>(result: ProviderResult<T>, tag: ErrorTag, name: &str, errors: &mut Vec<ReportError>) -> Option<T> {
    match result {
        ProviderResult::Found(data) => Some(data),
        ProviderResult::Unavailable => None,
        ProviderResult::Error(e) => {
            log::warn!(target: LOG_TARGET, "Could not collect '{tag}' facts for '{name}': {e:#}");
            errors.push(ReportError::new(tag, &e));
            None
        }
    }
}
