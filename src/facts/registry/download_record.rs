use super::DailyDownloads;
use serde::{Deserialize, Serialize};

const DAYS_PER_WEEK: usize = 7;
const MAX_WEEKS: usize = 20;
const WEEKS_PER_MONTH: usize = 4;

/// Downloads summed over seven consecutive days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBucket {
    pub start: String,
    pub end: String,
    pub downloads: u64,
}

/// Download activity folded into weekly buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRecord {
    /// Sum of the four most recent weeks, or 0 when fewer than four weeks exist
    pub monthly_downloads: u64,

    /// Up to 20 weeks, oldest first
    pub weekly_trend: Vec<WeekBucket>,
}

impl DownloadRecord {
    /// Fold a daily series into whole weeks counted back from the most recent day
    ///
    /// Leading days that do not fill a complete week are dropped.
    #[must_use]
    pub fn from_daily(mut days: Vec<DailyDownloads>) -> Self {
        days.sort_by(|a, b| a.day.cmp(&b.day));

        let week_count = (days.len() / DAYS_PER_WEEK).min(MAX_WEEKS);
        let first_counted = days.len() - week_count * DAYS_PER_WEEK;

        let weekly_trend: Vec<WeekBucket> = days
            .get(first_counted..)
            .unwrap_or_default()
            .chunks_exact(DAYS_PER_WEEK)
            .filter_map(|week| {
                let (first, last) = (week.first()?, week.last()?);
                Some(WeekBucket {
                    start: first.day.clone(),
                    end: last.day.clone(),
                    downloads: week.iter().map(|d| d.downloads).sum(),
                })
            })
            .collect();

        let monthly_downloads = if weekly_trend.len() >= WEEKS_PER_MONTH {
            weekly_trend.iter().rev().take(WEEKS_PER_MONTH).map(|w| w.downloads).sum()
        } else {
            0
        };

        Self {
            monthly_downloads,
            weekly_trend,
        }
    }
}
