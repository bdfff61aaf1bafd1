use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_DAY: f64 = 86400.0;

/// Elapsed time between two instants in machine and human form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeDifference {
    /// Fractional days, rounded to two decimals
    pub days: f64,

    /// e.g. `45 minutes`, `1 hour`, `3 days`
    pub human_readable: String,
}

/// Describe the time from `start` to `end`
///
/// Under an hour the unit is whole minutes (truncated), under a day whole hours
/// (truncated), otherwise days rounded half-to-even. A negative span counts as zero.
#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss, reason = "values are non-negative and small")]
pub fn format_time_difference(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeDifference {
    let seconds = (end - start).num_milliseconds().max(0) as f64 / 1000.0;
    let days = seconds / SECONDS_PER_DAY;

    let human_readable = if seconds < SECONDS_PER_HOUR {
        pluralize((seconds / SECONDS_PER_MINUTE) as u64, "minute")
    } else if seconds < SECONDS_PER_DAY {
        pluralize((seconds / SECONDS_PER_HOUR) as u64, "hour")
    } else {
        pluralize(days.round_ties_even() as u64, "day")
    };

    TimeDifference {
        days: (days * 100.0).round() / 100.0,
        human_readable,
    }
}

fn pluralize(count: u64, unit: &str) -> String {
    if count == 1 { format!("{count} {unit}") } else { format!("{count} {unit}s") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn base() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T00:00:00Z").unwrap().with_timezone(&Utc)
    }

    fn after(delta: TimeDelta) -> TimeDifference {
        format_time_difference(base(), base() + delta)
    }

    #[test]
    fn test_minutes() {
        assert_eq!(after(TimeDelta::seconds(30)).human_readable, "0 minutes");
        assert_eq!(after(TimeDelta::seconds(90)).human_readable, "1 minute");
        assert_eq!(after(TimeDelta::minutes(59)).human_readable, "59 minutes");
    }

    #[test]
    fn test_hours_are_truncated() {
        assert_eq!(after(TimeDelta::minutes(60)).human_readable, "1 hour");
        assert_eq!(after(TimeDelta::minutes(150)).human_readable, "2 hours");
        assert_eq!(after(TimeDelta::hours(23) + TimeDelta::minutes(59)).human_readable, "23 hours");
    }

    #[test]
    fn test_days_are_rounded() {
        assert_eq!(after(TimeDelta::hours(24)).human_readable, "1 day");
        assert_eq!(after(TimeDelta::hours(36)).human_readable, "2 days");
        assert_eq!(after(TimeDelta::hours(60)).human_readable, "2 days");
        assert_eq!(after(TimeDelta::hours(80)).human_readable, "3 days");
    }

    #[test]
    fn test_singular_follows_displayed_count() {
        assert_eq!(after(TimeDelta::seconds(119)).human_readable, "1 minute");
        assert_eq!(after(TimeDelta::minutes(119)).human_readable, "1 hour");
        assert_eq!(after(TimeDelta::hours(30)).human_readable, "1 day");
    }

    #[test]
    fn test_fractional_days() {
        assert!((after(TimeDelta::hours(36)).days - 1.5).abs() < f64::EPSILON);
        assert!((after(TimeDelta::minutes(100)).days - 0.07).abs() < 1e-9);
    }

    #[test]
    fn test_negative_span_is_zero() {
        let diff = format_time_difference(base(), base() - TimeDelta::hours(5));
        assert_eq!(diff.human_readable, "0 minutes");
        assert!(diff.days.abs() < f64::EPSILON);
    }
}
