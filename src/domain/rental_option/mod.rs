//! Rental option aggregate
//!
//! Add-on catalog entries (GPS, child seat, extra insurance) billed per day
//! alongside the vehicle's base rate.

pub mod model;
pub mod repository;

pub use model::RentalOption;
pub use repository::RentalOptionRepository;
