//! UTC day-boundary helpers
//!
//! All day-granular logic in the service (calendar availability, day
//! bucketing for statistics) works on UTC calendar days. These helpers are
//! the single place that knows what "start of day" and "end of day" mean.

use chrono::{DateTime, Duration, NaiveTime, Utc};

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// The instant at 00:00:00.000 UTC of the given instant's calendar day.
pub fn day_floor(t: DateTime<Utc>) -> DateTime<Utc> {
    t.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// The instant at 23:59:59.999 UTC of the given instant's calendar day.
pub fn day_ceil(t: DateTime<Utc>) -> DateTime<Utc> {
    day_floor(t) + Duration::days(1) - Duration::milliseconds(1)
}

/// Stable `YYYY-MM-DD` key for grouping by UTC calendar day.
pub fn day_key(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d").to_string()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn floor_zeroes_the_time() {
        let t = at(2025, 6, 15, 13, 45, 30);
        assert_eq!(day_floor(t), at(2025, 6, 15, 0, 0, 0));
    }

    #[test]
    fn floor_is_idempotent() {
        let t = at(2025, 6, 15, 0, 0, 0);
        assert_eq!(day_floor(t), t);
    }

    #[test]
    fn ceil_is_last_millisecond() {
        let t = at(2025, 6, 15, 13, 45, 30);
        let end = day_ceil(t);
        assert_eq!(day_key(end), "2025-06-15");
        assert_eq!(end + Duration::milliseconds(1), at(2025, 6, 16, 0, 0, 0));
    }

    #[test]
    fn day_key_format() {
        assert_eq!(day_key(at(2025, 1, 5, 23, 59, 59)), "2025-01-05");
    }
}
