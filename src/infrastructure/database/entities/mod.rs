//! Database entities module

pub mod app_settings;
pub mod availability_period;
pub mod notification;
pub mod rental_option;
pub mod reservation;
pub mod user;
pub mod vehicle;

pub use app_settings::Entity as AppSettings;
pub use availability_period::Entity as AvailabilityPeriod;
pub use notification::Entity as Notification;
pub use rental_option::Entity as RentalOption;
pub use reservation::Entity as Reservation;
pub use user::Entity as User;
pub use vehicle::Entity as Vehicle;
