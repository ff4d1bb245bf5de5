//! Vehicle domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult};
use crate::shared::types::time::{day_ceil, day_floor};

/// Rentable vehicle in the fleet
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    /// Base day rate
    pub price_per_day: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Derived flag: true iff the vehicle has at least one availability period
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(
        id: impl Into<String>,
        brand: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        price_per_day: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            brand: brand.into(),
            model: model.into(),
            year,
            price_per_day,
            description: None,
            image_url: None,
            is_available: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// "Brand Model (Year)" label used in notifications
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.year)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.brand.trim().is_empty() {
            return Err(DomainError::Validation("Brand must not be empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(DomainError::Validation("Model must not be empty".into()));
        }
        if !(1950..=2100).contains(&self.year) {
            return Err(DomainError::Validation(format!(
                "Year {} is out of range",
                self.year
            )));
        }
        if self.price_per_day <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "Price per day must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// A window in which a vehicle can be rented
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityPeriod {
    pub id: String,
    pub vehicle_id: String,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
}

impl AvailabilityPeriod {
    pub fn new(
        id: impl Into<String>,
        vehicle_id: impl Into<String>,
        start_date_time: DateTime<Utc>,
        end_date_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            vehicle_id: vehicle_id.into(),
            start_date_time,
            end_date_time,
        }
    }

    /// Periods must span forward in time; zero-length periods are rejected.
    pub fn validate(&self) -> DomainResult<()> {
        if self.end_date_time <= self.start_date_time {
            return Err(DomainError::Validation(
                "Availability period end must be after its start".into(),
            ));
        }
        Ok(())
    }

    /// Calendar-day containment: the period widened to whole UTC days
    /// (start floored, end ceiled) contains the instant.
    pub fn contains_day(&self, instant: DateTime<Utc>) -> bool {
        day_floor(self.start_date_time) <= instant && instant <= day_ceil(self.end_date_time)
    }

    /// Exact containment: this single period covers `[start, end]` entirely.
    pub fn covers(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_date_time <= start && self.end_date_time >= end
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, 0, 0).unwrap()
    }

    fn sample_vehicle() -> Vehicle {
        Vehicle::new("veh-1", "Toyota", "Camry", 2022, Decimal::from(75))
    }

    #[test]
    fn new_vehicle_starts_unavailable() {
        let v = sample_vehicle();
        assert!(!v.is_available);
        assert!(v.validate().is_ok());
    }

    #[test]
    fn display_name_includes_year() {
        assert_eq!(sample_vehicle().display_name(), "Toyota Camry (2022)");
    }

    #[test]
    fn blank_brand_rejected() {
        let mut v = sample_vehicle();
        v.brand = "  ".into();
        assert!(v.validate().is_err());
    }

    #[test]
    fn year_out_of_range_rejected() {
        let mut v = sample_vehicle();
        v.year = 1900;
        assert!(v.validate().is_err());
        v.year = 2101;
        assert!(v.validate().is_err());
    }

    #[test]
    fn non_positive_price_rejected() {
        let mut v = sample_vehicle();
        v.price_per_day = Decimal::ZERO;
        assert!(v.validate().is_err());
        v.price_per_day = Decimal::from(-10);
        assert!(v.validate().is_err());
    }

    #[test]
    fn period_end_must_be_after_start() {
        let p = AvailabilityPeriod::new("p1", "veh-1", at(10, 12), at(10, 12));
        assert!(p.validate().is_err());

        let p = AvailabilityPeriod::new("p1", "veh-1", at(10, 12), at(9, 12));
        assert!(p.validate().is_err());

        let p = AvailabilityPeriod::new("p1", "veh-1", at(10, 12), at(10, 13));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn contains_day_widens_to_day_bounds() {
        // period 15th 10:00 → 17th 14:00
        let p = AvailabilityPeriod::new("p1", "veh-1", at(15, 10), at(17, 14));

        // same day before the period's clock time still counts
        assert!(p.contains_day(at(15, 8)));
        // same day after the period's clock time still counts
        assert!(p.contains_day(at(17, 23)));
        // outside the widened days does not
        assert!(!p.contains_day(at(14, 23)));
        assert!(!p.contains_day(at(18, 0)));
    }

    #[test]
    fn covers_uses_exact_instants() {
        let p = AvailabilityPeriod::new("p1", "veh-1", at(15, 10), at(17, 14));
        assert!(p.covers(at(15, 10), at(17, 14)));
        assert!(p.covers(at(16, 0), at(16, 12)));
        // an hour before the exact start is not covered
        assert!(!p.covers(at(15, 9), at(16, 0)));
        assert!(!p.covers(at(16, 0), at(17, 15)));
    }
}
