//! Reservation DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Reservation;

/// Request to book a vehicle
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    pub vehicle_id: String,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    #[validate(length(min = 1, max = 200, message = "pickup location is required"))]
    pub pickup_location: String,
    /// Defaults to the pickup location when absent
    pub return_location: Option<String>,
    #[serde(default)]
    pub with_driver: bool,
    #[serde(default)]
    pub selected_option_ids: Vec<String>,
}

/// Reservation details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: String,
    pub vehicle_id: String,
    pub customer_id: String,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub pickup_location: String,
    pub return_location: String,
    pub with_driver: bool,
    pub selected_option_ids: Vec<String>,
    /// Priced once at creation; later catalog or rate changes do not touch it
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            vehicle_id: r.vehicle_id,
            customer_id: r.customer_id,
            start_date_time: r.start_date_time,
            end_date_time: r.end_date_time,
            pickup_location: r.pickup_location,
            return_location: r.return_location,
            with_driver: r.with_driver,
            selected_option_ids: r.selected_option_ids,
            total_price: r.total_price,
            status: r.status.as_str().to_string(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Admin listing query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListReservationsParams {
    /// Filter by status (pending, confirmed, completed, cancelled)
    pub status: Option<String>,
    pub vehicle_id: Option<String>,
    pub customer_id: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Own-listing query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct MyReservationsParams {
    /// Filter by status (pending, confirmed, completed, cancelled)
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
