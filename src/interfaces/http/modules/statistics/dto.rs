//! Statistics API data transfer objects

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// ── Summary ────────────────────────────────────────────────────

/// Overall dashboard summary.
#[derive(Debug, Serialize, ToSchema)]
pub struct FleetSummary {
    /// Total number of vehicles in the fleet.
    pub total_vehicles: u64,
    /// Vehicles currently marked available (at least one open period).
    pub available_vehicles: u64,
    /// Total number of registered users.
    pub total_users: u64,
    /// All reservations ever taken.
    pub total_reservations: u64,
    /// Reservations awaiting confirmation.
    pub pending_reservations: u64,
    /// Confirmed, not yet completed.
    pub confirmed_reservations: u64,
    /// Completed rentals.
    pub completed_reservations: u64,
    /// Cancelled reservations.
    pub cancelled_reservations: u64,
    /// Notification records appended so far.
    pub notifications_sent: u64,
    /// Lifetime revenue over completed rentals.
    pub revenue_total: Decimal,
    /// Revenue from rentals completed this calendar month (UTC).
    pub revenue_month: Decimal,
    /// Display currency code from app settings.
    pub currency: String,
}

// ── Revenue ────────────────────────────────────────────────────

/// Revenue data point (one per UTC calendar day).
#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueBucket {
    /// Day label, `YYYY-MM-DD`.
    pub day: String,
    /// Revenue completed on this day.
    pub revenue: Decimal,
    /// Number of rentals completed on this day.
    pub reservation_count: u64,
}

/// Daily revenue breakdown response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueResponse {
    /// Look-back window that was applied, in days.
    pub days: u32,
    pub buckets: Vec<RevenueBucket>,
    /// Sum of all buckets.
    pub total_revenue: Decimal,
    pub currency: String,
}

// ── Top vehicles ───────────────────────────────────────────────

/// Per-vehicle demand entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct TopVehicleEntry {
    pub vehicle_id: String,
    /// None when the vehicle has since been removed from the fleet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Non-cancelled reservations taken for this vehicle.
    pub reservation_count: u64,
    /// Booked value across those reservations.
    pub revenue: Decimal,
}

/// Most-booked vehicles response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TopVehiclesResponse {
    pub vehicles: Vec<TopVehicleEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_summary_serialization() {
        let summary = FleetSummary {
            total_vehicles: 12,
            available_vehicles: 9,
            total_users: 40,
            total_reservations: 120,
            pending_reservations: 4,
            confirmed_reservations: 7,
            completed_reservations: 100,
            cancelled_reservations: 9,
            notifications_sent: 220,
            revenue_total: Decimal::from(46_000),
            revenue_month: Decimal::from(3_200),
            currency: "USD".to_string(),
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"total_vehicles\":12"));
        assert!(json.contains("\"pending_reservations\":4"));
        assert!(json.contains("\"currency\":\"USD\""));
    }

    #[test]
    fn test_top_vehicle_entry_skips_missing_metadata() {
        let entry = TopVehicleEntry {
            vehicle_id: "veh-1".to_string(),
            brand: None,
            model: None,
            year: None,
            reservation_count: 3,
            revenue: Decimal::from(900),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"reservation_count\":3"));
        assert!(!json.contains("brand"));
        assert!(!json.contains("year"));
    }
}
