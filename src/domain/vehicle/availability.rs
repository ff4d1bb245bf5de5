//! Availability predicates
//!
//! Two deliberately different contracts read a vehicle's period list:
//!
//! * [`is_available_on`] answers "can this calendar day be lit up?" and
//!   widens every period to whole UTC days.
//! * [`covers_interval`] answers "can this exact pickup/return pair be
//!   booked?" and requires a single period to contain the whole interval.
//!   Adjacent or overlapping periods are never merged; a request spanning
//!   the seam between two touching periods is not coverable.
//!
//! A vehicle with no periods is unavailable under both contracts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::model::AvailabilityPeriod;
use crate::shared::types::time::day_key;

/// Day-granular check used by calendar views.
pub fn is_available_on(instant: DateTime<Utc>, periods: &[AvailabilityPeriod]) -> bool {
    periods.iter().any(|p| p.contains_day(instant))
}

/// Booking-time gate: some single period must contain `[start, end]`.
pub fn covers_interval(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    periods: &[AvailabilityPeriod],
) -> bool {
    periods.iter().any(|p| p.covers(start, end))
}

/// A vehicle is rentable at all iff it has at least one period.
pub fn has_availability(periods: &[AvailabilityPeriod]) -> bool {
    !periods.is_empty()
}

/// Periods bucketed by the UTC calendar day they start on
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    /// `YYYY-MM-DD`
    pub day: String,
    pub periods: Vec<AvailabilityPeriod>,
}

/// Group periods by start day for calendar rendering. Presentation only;
/// neither predicate reads the grouping.
pub fn group_by_day(periods: &[AvailabilityPeriod]) -> Vec<DayGroup> {
    let mut buckets: BTreeMap<String, Vec<AvailabilityPeriod>> = BTreeMap::new();
    for p in periods {
        buckets
            .entry(day_key(p.start_date_time))
            .or_default()
            .push(p.clone());
    }
    buckets
        .into_iter()
        .map(|(day, periods)| DayGroup { day, periods })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, 0, 0).unwrap()
    }

    fn period(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> AvailabilityPeriod {
        AvailabilityPeriod::new(id, "veh-1", start, end)
    }

    #[test]
    fn empty_periods_fail_both_contracts() {
        assert!(!is_available_on(at(15, 12), &[]));
        assert!(!covers_interval(at(15, 12), at(16, 12), &[]));
        assert!(!has_availability(&[]));
    }

    #[test]
    fn day_check_matches_any_widened_period() {
        let periods = vec![
            period("p1", at(10, 9), at(11, 18)),
            period("p2", at(20, 9), at(22, 18)),
        ];
        assert!(is_available_on(at(10, 0), &periods));
        assert!(is_available_on(at(11, 23), &periods));
        assert!(is_available_on(at(21, 12), &periods));
        assert!(!is_available_on(at(15, 12), &periods));
        assert!(!is_available_on(at(23, 0), &periods));
    }

    #[test]
    fn cover_requires_a_single_containing_period() {
        let periods = vec![period("p1", at(10, 0), at(14, 0))];
        assert!(covers_interval(at(10, 0), at(14, 0), &periods));
        assert!(covers_interval(at(11, 8), at(12, 20), &periods));
        assert!(!covers_interval(at(9, 23), at(12, 0), &periods));
        assert!(!covers_interval(at(12, 0), at(14, 1), &periods));
    }

    #[test]
    fn adjacent_periods_are_not_merged() {
        // p1 ends exactly where p2 starts
        let periods = vec![
            period("p1", at(10, 0), at(12, 0)),
            period("p2", at(12, 0), at(14, 0)),
        ];
        // inside either single period: fine
        assert!(covers_interval(at(10, 0), at(12, 0), &periods));
        assert!(covers_interval(at(12, 0), at(14, 0), &periods));
        // spanning the seam: rejected even though the union is continuous
        assert!(!covers_interval(at(11, 0), at(13, 0), &periods));
    }

    #[test]
    fn overlapping_periods_are_not_merged_either() {
        let periods = vec![
            period("p1", at(10, 0), at(13, 0)),
            period("p2", at(12, 0), at(15, 0)),
        ];
        assert!(!covers_interval(at(11, 0), at(14, 0), &periods));
        assert!(covers_interval(at(12, 0), at(13, 0), &periods));
    }

    #[test]
    fn grouping_buckets_by_start_day_sorted() {
        let periods = vec![
            period("p3", at(20, 14), at(20, 18)),
            period("p1", at(10, 9), at(10, 12)),
            period("p2", at(10, 14), at(11, 18)),
        ];
        let groups = group_by_day(&periods);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].day, "2025-06-10");
        assert_eq!(groups[0].periods.len(), 2);
        assert_eq!(groups[1].day, "2025-06-20");
        assert_eq!(groups[1].periods.len(), 1);
    }
}
