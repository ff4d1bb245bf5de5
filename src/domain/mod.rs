pub mod notification;
pub mod pricing;
pub mod rental_option;
pub mod repositories;
pub mod reservation;
pub mod settings;
pub mod user;
pub mod vehicle;

// Re-export commonly used types
pub use notification::{Notification, NotificationKind};
pub use pricing::{
    calculate_breakdown, calculate_total, format_price, rental_days, OptionLine, PriceBreakdown,
};
pub use rental_option::RentalOption;
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{Actor, Reservation, ReservationStatus};
pub use settings::AppSettings;
pub use user::{CreateUserDto, GetUserDto, UpdateUserDto, User, UserRepositoryInterface, UserRole};
pub use vehicle::{AvailabilityPeriod, Vehicle};

// Re-export DomainError from shared for convenience
pub use crate::shared::types::errors::DomainError;
