//! npm registry and downloads facts
//!
//! The [`RegistryClient`] fetches the raw package document and the raw daily download
//! series. [`PackageRecord`] and [`DownloadRecord`] turn those payloads into the flat
//! records that feed the health report.

mod client;
mod download_record;
mod error;
mod package_record;
mod size;

pub use client::{DailyDownloads, DownloadRange, PackageDocument, RegistryClient, VersionManifest};
pub use download_record::{DownloadRecord, WeekBucket};
pub use error::RegistryError;
pub use package_record::PackageRecord;
pub use size::format_size;

const LOG_TARGET: &str = "  registry";
