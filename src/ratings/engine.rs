use super::{Rating, RatingCategory};
use crate::facts::GithubData;
use crate::facts::registry::{DownloadRecord, PackageRecord};
use crate::facts::time_utils::{parse_timestamp, whole_days_between};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

const LOG_TARGET: &str = "   ratings";

const STRONG_MONTHLY_DOWNLOADS: u64 = 1_000_000;
const STRONG_STARS: u64 = 10_000;
const MODERATE_MONTHLY_DOWNLOADS: u64 = 100_000;
const MODERATE_STARS: u64 = 1_000;

const REGULAR_MERGE_DAYS: u64 = 14;
const OCCASIONAL_MERGE_DAYS: u64 = 30;

const REGULAR_RELEASE_DAYS: u64 = 30;
const REGULAR_RELEASES_PER_YEAR: u64 = 12;
const OCCASIONAL_RELEASE_DAYS: u64 = 90;
const OCCASIONAL_RELEASES_PER_YEAR: u64 = 4;

const LIGHTWEIGHT_SIZE: f64 = 100.0;
const LIGHTWEIGHT_DEPENDENCIES: u64 = 5;
const MODERATE_SIZE: f64 = 500.0;
const MODERATE_DEPENDENCIES: u64 = 15;

const THOROUGH_HEALTH_PERCENTAGE: u8 = 80;
const ADEQUATE_HEALTH_PERCENTAGE: u8 = 50;

/// The facts a rating is computed from; any source may be missing
#[derive(Debug, Clone, Copy)]
pub struct RatingInputs<'a> {
    pub package: Option<&'a PackageRecord>,
    pub downloads: Option<&'a DownloadRecord>,
    pub github: &'a GithubData,
}

/// A rating for every category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HealthRatings(BTreeMap<RatingCategory, Rating>);

impl HealthRatings {
    /// The rating for `category`, `Unavailable` if it was never rated
    #[must_use]
    pub fn get(&self, category: RatingCategory) -> Rating {
        self.0.get(&category).copied().unwrap_or(Rating::Unavailable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RatingCategory, Rating)> + '_ {
        self.0.iter().map(|(category, rating)| (*category, *rating))
    }
}

/// Rate every category from the available facts
///
/// Total and deterministic for a given `now`: a category whose inputs are missing or
/// cannot be interpreted is rated `Unavailable` without affecting the others.
#[must_use]
pub fn compute_ratings(inputs: &RatingInputs<'_>, now: DateTime<Utc>) -> HealthRatings {
    HealthRatings(
        RatingCategory::iter()
            .map(|category| {
                let rating = rate(category, inputs, now).unwrap_or_else(|| {
                    log::debug!(target: LOG_TARGET, "Could not compute '{category}', rating it unavailable");
                    Rating::Unavailable
                });
                (category, rating)
            })
            .collect(),
    )
}

/// `None` signals that the inputs were present but could not be interpreted
fn rate(category: RatingCategory, inputs: &RatingInputs<'_>, now: DateTime<Utc>) -> Option<Rating> {
    match category {
        RatingCategory::CommunityAdoption => Some(community_adoption(inputs)),
        RatingCategory::MaintenanceFrequency => Some(maintenance_frequency(inputs, now)),
        RatingCategory::ReleaseManagement => release_management(inputs),
        RatingCategory::ImplementationFootprint => implementation_footprint(inputs),
        RatingCategory::DocumentationCompleteness => Some(documentation_completeness(inputs)),
    }
}

fn community_adoption(inputs: &RatingInputs<'_>) -> Rating {
    let monthly = inputs.downloads.map_or(0, |d| d.monthly_downloads);
    let stars = inputs.github.repo.as_ref().map_or(0, |r| r.stars);

    if monthly >= STRONG_MONTHLY_DOWNLOADS || stars >= STRONG_STARS {
        Rating::Strong
    } else if monthly >= MODERATE_MONTHLY_DOWNLOADS || stars >= MODERATE_STARS {
        Rating::Moderate
    } else {
        Rating::Limited
    }
}

fn maintenance_frequency(inputs: &RatingInputs<'_>, now: DateTime<Utc>) -> Rating {
    let (Some(repo), Some(activity)) = (&inputs.github.repo, &inputs.github.activity) else {
        return Rating::Unavailable;
    };

    if repo.is_archived || !repo.is_maintained {
        return Rating::Infrequent;
    }

    let Some(merged_at) = activity.last_pr_merged_at.as_deref() else {
        return Rating::Infrequent;
    };

    let Some(merged) = parse_timestamp(merged_at) else {
        return Rating::Occasional;
    };

    match whole_days_between(merged, now) {
        days if days <= REGULAR_MERGE_DAYS => Rating::Regular,
        days if days <= OCCASIONAL_MERGE_DAYS => Rating::Occasional,
        _ => Rating::Infrequent,
    }
}

fn release_management(inputs: &RatingInputs<'_>) -> Option<Rating> {
    let Some(package) = inputs.package else {
        return Some(Rating::Unavailable);
    };

    if inputs.github.repo.as_ref().is_some_and(|r| r.is_archived) {
        return Some(Rating::Infrequent);
    }

    let days = package.days_since_last_release?;
    let releases = package.releases_last_year;

    Some(if days <= REGULAR_RELEASE_DAYS && releases >= REGULAR_RELEASES_PER_YEAR {
        Rating::Regular
    } else if days <= OCCASIONAL_RELEASE_DAYS && releases >= OCCASIONAL_RELEASES_PER_YEAR {
        Rating::Occasional
    } else {
        Rating::Infrequent
    })
}

fn implementation_footprint(inputs: &RatingInputs<'_>) -> Option<Rating> {
    let Some(package) = inputs.package else {
        return Some(Rating::Unavailable);
    };

    let size = size_magnitude(&package.bundle_size)?;
    let deps = package.dependencies_count;

    Some(if size < LIGHTWEIGHT_SIZE && deps < LIGHTWEIGHT_DEPENDENCIES {
        Rating::Lightweight
    } else if size < MODERATE_SIZE && deps < MODERATE_DEPENDENCIES {
        Rating::Moderate
    } else {
        Rating::Heavy
    })
}

fn documentation_completeness(inputs: &RatingInputs<'_>) -> Rating {
    let Some(health) = &inputs.github.health else {
        return Rating::Unavailable;
    };

    let basics = health.has_readme && health.has_license;

    if health.health_percentage >= THOROUGH_HEALTH_PERCENTAGE && basics && (health.has_contributing || health.has_code_of_conduct) {
        Rating::Thorough
    } else if health.health_percentage >= ADEQUATE_HEALTH_PERCENTAGE && basics {
        Rating::Adequate
    } else {
        Rating::Sparse
    }
}

/// The number in a formatted size such as `2.50 MB`; the unit is not considered
fn size_magnitude(formatted: &str) -> Option<f64> {
    let digits: String = formatted.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if digits.is_empty() {
        return Some(0.0);
    }

    digits.parse().ok()
}
