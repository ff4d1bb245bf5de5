//! Rental option domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult};

/// Bookable add-on, priced per rental day
#[derive(Debug, Clone, PartialEq)]
pub struct RentalOption {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Day rate added for each billable day when selected
    pub price_per_day: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RentalOption {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        price_per_day: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description,
            price_per_day,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Option name must not be empty".into(),
            ));
        }
        if self.price_per_day < Decimal::ZERO {
            return Err(DomainError::Validation(
                "Option price per day must not be negative".into(),
            ));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_option_passes() {
        let o = RentalOption::new("opt-1", "GPS", None, Decimal::from(5));
        assert!(o.validate().is_ok());
    }

    #[test]
    fn free_option_is_allowed() {
        let o = RentalOption::new("opt-1", "Roof box", None, Decimal::ZERO);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn blank_name_rejected() {
        let o = RentalOption::new("opt-1", "   ", None, Decimal::from(5));
        assert!(o.validate().is_err());
    }

    #[test]
    fn negative_price_rejected() {
        let o = RentalOption::new("opt-1", "GPS", None, Decimal::from(-1));
        assert!(o.validate().is_err());
    }
}
