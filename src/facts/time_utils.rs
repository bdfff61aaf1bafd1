use chrono::{DateTime, Utc};

/// Parse an RFC 3339 timestamp such as `2025-05-31T12:00:00.000Z`
pub(crate) fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text).ok().map(|t| t.with_timezone(&Utc))
}

/// Whole days from `then` to `now`, never negative
pub(crate) fn whole_days_between(then: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - then).num_days()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_parse_timestamp_variants() {
        assert!(parse_timestamp("2025-05-31T12:00:00.000Z").is_some());
        assert!(parse_timestamp("2025-05-31T12:00:00+02:00").is_some());
        assert!(parse_timestamp("2025-05-31").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_whole_days_floor() {
        let now = parse_timestamp("2025-06-10T12:00:00Z").unwrap();
        assert_eq!(whole_days_between(now - TimeDelta::hours(47), now), 1);
        assert_eq!(whole_days_between(now - TimeDelta::hours(48), now), 2);
    }

    #[test]
    fn test_future_clamps_to_zero() {
        let now = parse_timestamp("2025-06-10T12:00:00Z").unwrap();
        assert_eq!(whole_days_between(now + TimeDelta::days(3), now), 0);
    }
}
