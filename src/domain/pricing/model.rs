//! Pricing rules for rentals
//!
//! A rental is billed per calendar-day slice: the day count is the
//! millisecond span between pickup and return divided by a day, rounded up,
//! plus one. Two instants on the same day therefore bill one day, and a
//! rental touching a second day bills two. The driver surcharge and every
//! selected option multiply the same day count. Totals are exact decimals;
//! rounding happens only in `format_price`.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::rental_option::RentalOption;
use crate::shared::types::time::MS_PER_DAY;

/// Driver service surcharge per rental day.
pub const DRIVER_FEE_PER_DAY: i64 = 80;

/// Number of billable days between two optional instants.
///
/// Returns 0 when either endpoint is missing. Callers validate ordering
/// before pricing; a negative span is not defended against here.
pub fn rental_days(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> i64 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0;
    };
    let span_ms = end.signed_duration_since(start).num_milliseconds();
    ceil_days(span_ms) + 1
}

fn ceil_days(span_ms: i64) -> i64 {
    (span_ms + MS_PER_DAY - 1).div_euclid(MS_PER_DAY)
}

/// One priced line for a selected rental option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionLine {
    pub option_id: String,
    pub name: String,
    pub price_per_day: Decimal,
    pub line_total: Decimal,
}

/// Itemized price for a rental request.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub days: i64,
    pub base_total: Decimal,
    pub driver_total: Decimal,
    pub options_total: Decimal,
    pub option_lines: Vec<OptionLine>,
    pub total: Decimal,
}

/// Calculate the itemized price for a rental.
///
/// * `price_per_day` — the vehicle's day rate; a missing rate bills a zero
///   base rather than erroring.
/// * `selected_option_ids` — ids chosen by the customer, resolved against
///   `catalog`. Ids with no catalog entry are skipped silently so carts
///   referencing a deleted option still price.
pub fn calculate_breakdown(
    price_per_day: Option<Decimal>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    with_driver: bool,
    selected_option_ids: &[String],
    catalog: &[RentalOption],
) -> PriceBreakdown {
    let days = rental_days(start, end);
    let days_dec = Decimal::from(days);

    let base_total = price_per_day.unwrap_or(Decimal::ZERO) * days_dec;

    let driver_total = if with_driver {
        Decimal::from(DRIVER_FEE_PER_DAY) * days_dec
    } else {
        Decimal::ZERO
    };

    let mut option_lines = Vec::new();
    let mut options_total = Decimal::ZERO;
    for id in selected_option_ids {
        if let Some(option) = catalog.iter().find(|o| &o.id == id) {
            let line_total = option.price_per_day * days_dec;
            options_total += line_total;
            option_lines.push(OptionLine {
                option_id: option.id.clone(),
                name: option.name.clone(),
                price_per_day: option.price_per_day,
                line_total,
            });
        }
    }

    PriceBreakdown {
        days,
        base_total,
        driver_total,
        options_total,
        option_lines,
        total: base_total + driver_total + options_total,
    }
}

/// Total price for a rental. Same math as `calculate_breakdown`.
pub fn calculate_total(
    price_per_day: Option<Decimal>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    with_driver: bool,
    selected_option_ids: &[String],
    catalog: &[RentalOption],
) -> Decimal {
    calculate_breakdown(
        price_per_day,
        start,
        end,
        with_driver,
        selected_option_ids,
        catalog,
    )
    .total
}

/// Format an amount for display: whole currency units, midpoint away from
/// zero, e.g. `"USD 460"`. Stored amounts keep full precision.
pub fn format_price(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{} {}", currency, rounded)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap()
    }

    fn option(id: &str, name: &str, price: i64) -> RentalOption {
        RentalOption::new(id, name, None, Decimal::from(price))
    }

    #[test]
    fn days_zero_when_either_endpoint_missing() {
        assert_eq!(rental_days(None, Some(t0())), 0);
        assert_eq!(rental_days(Some(t0()), None), 0);
        assert_eq!(rental_days(None, None), 0);
    }

    #[test]
    fn days_same_instant_is_one() {
        assert_eq!(rental_days(Some(t0()), Some(t0())), 1);
    }

    #[test]
    fn days_exactly_24h_is_two() {
        assert_eq!(rental_days(Some(t0()), Some(t0() + Duration::hours(24))), 2);
    }

    #[test]
    fn days_24h_plus_a_minute_is_three() {
        let end = t0() + Duration::hours(24) + Duration::minutes(1);
        assert_eq!(rental_days(Some(t0()), Some(end)), 3);
    }

    #[test]
    fn days_one_minute_is_two() {
        assert_eq!(rental_days(Some(t0()), Some(t0() + Duration::minutes(1))), 2);
    }

    #[test]
    fn days_partial_day_rounds_up() {
        assert_eq!(rental_days(Some(t0()), Some(t0() + Duration::hours(23))), 2);
        assert_eq!(
            rental_days(Some(t0()), Some(t0() + Duration::hours(47))),
            3
        );
    }

    #[test]
    fn base_total_multiplies_day_count() {
        // 9:00 to 9:00 two days later → 3 billable days
        let end = t0() + Duration::days(2);
        let bd = calculate_breakdown(
            Some(Decimal::from(100)),
            Some(t0()),
            Some(end),
            false,
            &[],
            &[],
        );
        assert_eq!(bd.days, 3);
        assert_eq!(bd.base_total, Decimal::from(300));
        assert_eq!(bd.total, Decimal::from(300));
    }

    #[test]
    fn missing_day_rate_bills_zero_base() {
        let bd = calculate_breakdown(None, Some(t0()), Some(t0()), false, &[], &[]);
        assert_eq!(bd.base_total, Decimal::ZERO);
        assert_eq!(bd.total, Decimal::ZERO);
    }

    #[test]
    fn driver_fee_is_80_per_day() {
        let end = t0() + Duration::hours(24); // 2 days
        let bd = calculate_breakdown(
            Some(Decimal::from(100)),
            Some(t0()),
            Some(end),
            true,
            &[],
            &[],
        );
        assert_eq!(bd.driver_total, Decimal::from(160));
        assert_eq!(bd.total, Decimal::from(360));
    }

    #[test]
    fn no_driver_no_fee() {
        let bd = calculate_breakdown(
            Some(Decimal::from(100)),
            Some(t0()),
            Some(t0()),
            false,
            &[],
            &[],
        );
        assert_eq!(bd.driver_total, Decimal::ZERO);
    }

    #[test]
    fn selected_options_multiply_days() {
        let catalog = vec![option("gps", "GPS", 5), option("seat", "Child seat", 7)];
        let selected = vec!["gps".to_string(), "seat".to_string()];
        let end = t0() + Duration::days(2); // 3 days
        let bd = calculate_breakdown(
            Some(Decimal::from(50)),
            Some(t0()),
            Some(end),
            false,
            &selected,
            &catalog,
        );
        // gps: 15, seat: 21
        assert_eq!(bd.options_total, Decimal::from(36));
        assert_eq!(bd.option_lines.len(), 2);
        assert_eq!(bd.option_lines[0].line_total, Decimal::from(15));
        assert_eq!(bd.total, Decimal::from(186));
    }

    #[test]
    fn unknown_option_ids_are_skipped() {
        let catalog = vec![option("gps", "GPS", 5)];
        let selected = vec!["gps".to_string(), "deleted-one".to_string()];
        let bd = calculate_breakdown(
            Some(Decimal::from(50)),
            Some(t0()),
            Some(t0()),
            false,
            &selected,
            &catalog,
        );
        assert_eq!(bd.option_lines.len(), 1);
        assert_eq!(bd.options_total, Decimal::from(5));
    }

    #[test]
    fn empty_catalog_prices_no_options() {
        let selected = vec!["gps".to_string()];
        let bd = calculate_breakdown(
            Some(Decimal::from(50)),
            Some(t0()),
            Some(t0()),
            false,
            &selected,
            &[],
        );
        assert_eq!(bd.options_total, Decimal::ZERO);
        assert_eq!(bd.total, Decimal::from(50));
    }

    #[test]
    fn fractional_rates_stay_exact() {
        // 99.99 * 3 must be 299.97, not a float approximation
        let end = t0() + Duration::days(2);
        let bd = calculate_breakdown(
            Some(Decimal::new(9999, 2)),
            Some(t0()),
            Some(end),
            false,
            &[],
            &[],
        );
        assert_eq!(bd.base_total, Decimal::new(29997, 2));
    }

    #[test]
    fn breakdown_parts_sum_to_total() {
        let catalog = vec![option("gps", "GPS", 5)];
        let selected = vec!["gps".to_string()];
        let end = t0() + Duration::days(4);
        let bd = calculate_breakdown(
            Some(Decimal::new(7550, 2)),
            Some(t0()),
            Some(end),
            true,
            &selected,
            &catalog,
        );
        assert_eq!(bd.total, bd.base_total + bd.driver_total + bd.options_total);
    }

    #[test]
    fn calculate_total_matches_breakdown() {
        let catalog = vec![option("gps", "GPS", 5)];
        let selected = vec!["gps".to_string()];
        let end = t0() + Duration::days(1);
        let total = calculate_total(
            Some(Decimal::from(80)),
            Some(t0()),
            Some(end),
            true,
            &selected,
            &catalog,
        );
        let bd = calculate_breakdown(
            Some(Decimal::from(80)),
            Some(t0()),
            Some(end),
            true,
            &selected,
            &catalog,
        );
        assert_eq!(total, bd.total);
    }

    #[test]
    fn format_price_rounds_to_whole_units() {
        assert_eq!(format_price(Decimal::new(46040, 2), "USD"), "USD 460");
        assert_eq!(format_price(Decimal::new(46050, 2), "USD"), "USD 461");
        assert_eq!(format_price(Decimal::ZERO, "EUR"), "EUR 0");
    }
}
