//! App settings aggregate
//!
//! Single-row storefront settings (display currency, contact details).

pub mod model;
pub mod repository;

pub use model::AppSettings;
pub use repository::SettingsRepository;
