//! Settings DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::AppSettings;

/// Storefront settings API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsDto {
    pub currency: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub maintenance_mode: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<AppSettings> for SettingsDto {
    fn from(s: AppSettings) -> Self {
        Self {
            currency: s.currency,
            contact_email: s.contact_email,
            contact_phone: s.contact_phone,
            maintenance_mode: s.maintenance_mode,
            updated_at: s.updated_at,
        }
    }
}

/// Full replacement of the settings row
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSettingsRequest {
    /// ISO 4217 display currency code
    #[validate(length(min = 1, max = 10, message = "currency code is required"))]
    pub currency: String,
    #[validate(email(message = "invalid contact email"))]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub maintenance_mode: bool,
}
