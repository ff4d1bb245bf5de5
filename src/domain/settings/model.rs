//! App settings domain entity

use chrono::{DateTime, Utc};

/// Storefront-wide settings, stored as a single row
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// ISO 4217 display currency; scales nothing in the math
    pub currency: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    /// Informational banner flag; requests are not blocked
    pub maintenance_mode: bool,
    pub updated_at: DateTime<Utc>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            contact_email: None,
            contact_phone: None,
            maintenance_mode: false,
            updated_at: Utc::now(),
        }
    }
}
