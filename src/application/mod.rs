pub mod booking;
pub mod fleet;
pub mod identity;

// Re-export key types for convenience
pub use booking::{BookingService, CreateReservationRequest};
pub use fleet::{FleetService, PeriodPayload, VehiclePayload};
pub use identity::{role_to_str, str_to_role, AuthResult, UserService};
