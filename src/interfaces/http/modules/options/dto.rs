//! Rental option DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::RentalOption;

/// Rental option API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct RentalOptionDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_per_day: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RentalOption> for RentalOptionDto {
    fn from(o: RentalOption) -> Self {
        Self {
            id: o.id,
            name: o.name,
            description: o.description,
            price_per_day: o.price_per_day,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

/// Create / full-update payload for a rental option
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RentalOptionRequest {
    #[validate(length(min = 1, max = 100, message = "option name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub price_per_day: Decimal,
}
