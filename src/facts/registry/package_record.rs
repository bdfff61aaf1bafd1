use super::{PackageDocument, RegistryError, VersionManifest, format_size};
use crate::facts::time_utils::{parse_timestamp, whole_days_between};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const RELEASE_LOOKBACK_DAYS: i64 = 365;

/// Time markers that share the `time` map with per-version publish dates
const NON_RELEASE_TIME_KEYS: [&str; 2] = ["created", "modified"];

/// Registry facts about the latest version of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub latest_version: String,
    pub description: String,
    pub license: String,
    pub homepage: String,

    /// Human-readable unpacked size of the latest version, e.g. `2.50 MB`
    pub bundle_size: String,

    pub dependencies_count: u64,

    /// Repository URL with any `git+` prefix and `.git` suffix removed
    pub repository: String,

    /// Registry page for the package
    pub npm_url: String,

    /// Publish timestamp of the latest version, as the registry reported it
    pub last_release: Option<String>,

    pub days_since_last_release: Option<u64>,
    pub releases_last_year: u64,
    pub maintainers_count: u64,
}

impl PackageRecord {
    /// Normalize a raw registry document
    ///
    /// `package_page_url` is the base under which the package page lives; the package
    /// name is appended to it.
    ///
    /// # Errors
    ///
    /// Returns `PackageData` if the document has no `latest` tag or no manifest for it
    pub fn from_document(name: &str, doc: &PackageDocument, package_page_url: &str, now: DateTime<Utc>) -> Result<Self, RegistryError> {
        let latest_version = doc
            .latest_version()
            .ok_or_else(|| RegistryError::PackageData(format!("could not determine latest version for '{name}'")))?;

        let manifest = doc
            .manifest(latest_version)
            .and_then(VersionManifest::from_value)
            .ok_or_else(|| RegistryError::PackageData(format!("could not find version data for '{name}@{latest_version}'")))?;

        let last_release = doc.time.get(latest_version).and_then(Value::as_str).map(str::to_owned);
        let days_since_last_release = last_release.as_deref().and_then(parse_timestamp).map(|t| whole_days_between(t, now));

        Ok(Self {
            name: name.to_string(),
            latest_version: latest_version.to_string(),
            description: string_or_empty(&manifest.description),
            license: license_name(&manifest.license),
            homepage: string_or_empty(&manifest.homepage),
            bundle_size: format_size(manifest.unpacked_size().unwrap_or(0)),
            dependencies_count: manifest.dependencies.as_object().map_or(0, |deps| deps.len() as u64),
            repository: repository_url(&manifest.repository),
            npm_url: format!("{}/{name}", package_page_url.trim_end_matches('/')),
            last_release,
            days_since_last_release,
            releases_last_year: count_recent_releases(doc, now),
            maintainers_count: doc.maintainers.as_array().map_or(0, |m| m.len() as u64),
        })
    }
}

fn string_or_empty(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

/// `license` is normally an SPDX string, but older manifests use `{ "type": "MIT", "url": ... }`
fn license_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map.get("type").and_then(Value::as_str).unwrap_or_default().to_string(),
        _ => String::new(),
    }
}

/// `repository` is either a URL string or an object with a `url` member
fn repository_url(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("url").and_then(Value::as_str).unwrap_or_default(),
        _ => "",
    };

    let url = raw.strip_prefix("git+").unwrap_or(raw);
    url.strip_suffix(".git").unwrap_or(url).to_string()
}

fn count_recent_releases(doc: &PackageDocument, now: DateTime<Utc>) -> u64 {
    let cutoff = now - TimeDelta::days(RELEASE_LOOKBACK_DAYS);
    doc.release_times()
        .filter(|(key, _)| !NON_RELEASE_TIME_KEYS.contains(key))
        .filter_map(|(_, value)| value.as_str().and_then(parse_timestamp))
        .filter(|published| *published >= cutoff)
        .count() as u64
}
