//! npm registry API client
//!
//! Minimal client for the package metadata document and the daily downloads range.

use super::{LOG_TARGET, RegistryError};
use chrono::{DateTime, Days, Utc};
use core::time::Duration;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Days of history requested from the downloads API (20 weeks)
pub const DOWNLOAD_WINDOW_DAYS: u64 = 140;

/// Full package document as served by the registry, trimmed to the fields we read
///
/// Published documents accumulate years of history in whatever shape the publishing
/// client of the day produced, so nothing here is decoded beyond raw JSON. Only the
/// latest manifest is interpreted, by [`VersionManifest::from_value`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageDocument {
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: Value,

    #[serde(default)]
    pub versions: Value,

    /// Publish timestamps keyed by version, plus the `created` and `modified` markers
    #[serde(default)]
    pub time: Value,

    #[serde(default)]
    pub maintainers: Value,
}

impl PackageDocument {
    /// The version the `latest` dist-tag points at
    #[must_use]
    pub fn latest_version(&self) -> Option<&str> {
        self.dist_tags.get("latest").and_then(Value::as_str)
    }

    /// The raw manifest of one version
    #[must_use]
    pub fn manifest(&self, version: &str) -> Option<&Value> {
        self.versions.get(version)
    }

    /// Every `(key, timestamp)` entry of the `time` map
    pub fn release_times(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.time.as_object().into_iter().flatten().map(|(key, value)| (key.as_str(), value))
    }
}

/// Manifest of one published version
///
/// Several of these fields come in more than one shape in the wild (`license` may be
/// an object, `repository` may be a bare string), so they stay as raw JSON values
/// until normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionManifest {
    #[serde(default)]
    pub description: Value,

    #[serde(default)]
    pub license: Value,

    #[serde(default)]
    pub homepage: Value,

    #[serde(default)]
    pub repository: Value,

    #[serde(default)]
    pub dependencies: Value,

    #[serde(default)]
    pub dist: Value,
}

impl VersionManifest {
    /// Decode a raw manifest; anything but a JSON object yields `None`
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }

        Self::deserialize(value).ok()
    }

    /// Unpacked size of the published tarball, if the registry recorded a byte count
    #[must_use]
    pub fn unpacked_size(&self) -> Option<u64> {
        self.dist.get("unpackedSize").and_then(Value::as_u64)
    }
}

/// Daily download series for a date range
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloadRange {
    #[serde(default)]
    pub downloads: Vec<DailyDownloads>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyDownloads {
    pub day: String,
    pub downloads: u64,
}

/// Client for the npm registry and downloads APIs
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: reqwest::Client,
    registry_url: String,
    downloads_url: String,
}

impl RegistryClient {
    /// Create a new client against the given registry and downloads base URLs
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed
    pub fn new(registry_url: impl Into<String>, downloads_url: impl Into<String>, user_agent: &str, timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).timeout(timeout).build()?;

        Ok(Self {
            client,
            registry_url: registry_url.into(),
            downloads_url: downloads_url.into(),
        })
    }

    /// Get the registry base URL for this client
    #[must_use]
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Fetch the full registry document for a package
    ///
    /// # Errors
    ///
    /// `PackageNotFound` on a 404, `PackageData` if the document cannot be decoded,
    /// `Upstream` for any other failure
    pub async fn fetch_metadata(&self, name: &str) -> Result<PackageDocument, RegistryError> {
        let url = format!("{}/{}", self.registry_url.trim_end_matches('/'), encode_package_name(name));
        self.get_json(&url, name, "registry document").await
    }

    /// Fetch the daily download counts for the 20 weeks ending on `now`'s date
    ///
    /// # Errors
    ///
    /// `PackageNotFound` on a 404, `Upstream` for any other failure
    pub async fn fetch_downloads(&self, name: &str, now: DateTime<Utc>) -> Result<DownloadRange, RegistryError> {
        let end = now.date_naive();
        let start = end.checked_sub_days(Days::new(DOWNLOAD_WINDOW_DAYS)).unwrap_or(end);
        let url = format!(
            "{}/downloads/range/{}:{}/{name}",
            self.downloads_url.trim_end_matches('/'),
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );
        self.get_json(&url, name, "download counts").await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, name: &str, what: &str) -> Result<T, RegistryError> {
        log::debug!(target: LOG_TARGET, "Fetching {what} for '{name}' from {url}");

        let resp = self.client.get(url).send().await.map_err(|e| RegistryError::Upstream {
            status: None,
            message: format!("could not fetch {what} for '{name}': {e}"),
        })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RegistryError::PackageNotFound(name.to_string()));
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistryError::Upstream {
                status: Some(status.as_u16()),
                message: format!("could not fetch {what} for '{name}': {}", body.trim()),
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| RegistryError::PackageData(format!("could not decode {what} for '{name}': {e}")))
    }
}

/// Scoped names travel as a single path segment, so the scope separator is escaped
fn encode_package_name(name: &str) -> String {
    if name.starts_with('@') {
        name.replacen('/', "%2F", 1)
    } else {
        name.to_string()
    }
}
