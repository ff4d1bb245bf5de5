//! Vehicle DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::pricing::{OptionLine, PriceBreakdown};
use crate::domain::vehicle::{AvailabilityPeriod, DayGroup, Vehicle};

/// Vehicle API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleDto {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            brand: v.brand,
            model: v.model,
            year: v.year,
            price_per_day: v.price_per_day,
            description: v.description,
            image_url: v.image_url,
            is_available: v.is_available,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

/// Create / full-update payload. PUT replaces every field.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VehicleRequest {
    #[validate(length(min = 1, max = 100, message = "brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, max = 100, message = "model is required"))]
    pub model: String,
    #[validate(range(min = 1950, max = 2100, message = "year is out of range"))]
    pub year: i32,
    pub price_per_day: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// List vehicles query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListVehiclesParams {
    /// Case-insensitive substring over brand and model
    pub search: Option<String>,
    /// Exact brand filter
    pub brand: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Filter on the derived availability flag
    pub available: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Availability period API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct PeriodDto {
    pub id: String,
    pub vehicle_id: String,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
}

impl From<AvailabilityPeriod> for PeriodDto {
    fn from(p: AvailabilityPeriod) -> Self {
        Self {
            id: p.id,
            vehicle_id: p.vehicle_id,
            start_date_time: p.start_date_time,
            end_date_time: p.end_date_time,
        }
    }
}

/// One period in a replacement request
#[derive(Debug, Deserialize, ToSchema)]
pub struct PeriodItem {
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
}

/// Full replacement of a vehicle's availability periods
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReplacePeriodsRequest {
    pub periods: Vec<PeriodItem>,
}

/// Periods of one calendar day
#[derive(Debug, Serialize, ToSchema)]
pub struct DayGroupDto {
    /// `YYYY-MM-DD`
    pub day: String,
    pub periods: Vec<PeriodDto>,
}

impl From<DayGroup> for DayGroupDto {
    fn from(g: DayGroup) -> Self {
        Self {
            day: g.day,
            periods: g.periods.into_iter().map(PeriodDto::from).collect(),
        }
    }
}

/// Day-granular availability check query
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityCheckParams {
    /// Instant to check, RFC 3339
    pub at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityCheckResponse {
    pub vehicle_id: String,
    pub at: DateTime<Utc>,
    pub available: bool,
}

/// Price preview request for a rental
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QuoteRequest {
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    #[serde(default)]
    pub with_driver: bool,
    #[serde(default)]
    pub selected_option_ids: Vec<String>,
}

/// One priced option line
#[derive(Debug, Serialize, ToSchema)]
pub struct OptionLineDto {
    pub option_id: String,
    pub name: String,
    pub price_per_day: Decimal,
    pub line_total: Decimal,
}

impl From<OptionLine> for OptionLineDto {
    fn from(l: OptionLine) -> Self {
        Self {
            option_id: l.option_id,
            name: l.name,
            price_per_day: l.price_per_day,
            line_total: l.line_total,
        }
    }
}

/// Itemized price preview
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    pub days: i64,
    pub base_total: Decimal,
    pub driver_total: Decimal,
    pub options_total: Decimal,
    pub option_lines: Vec<OptionLineDto>,
    pub total: Decimal,
    pub currency: String,
    /// Whole currency units for display, e.g. `USD 460`
    pub formatted_total: String,
}

impl QuoteResponse {
    pub fn from_breakdown(b: PriceBreakdown, currency: String, formatted_total: String) -> Self {
        Self {
            days: b.days,
            base_total: b.base_total,
            driver_total: b.driver_total,
            options_total: b.options_total,
            option_lines: b.option_lines.into_iter().map(OptionLineDto::from).collect(),
            total: b.total,
            currency,
            formatted_total,
        }
    }
}
