pub mod auth;
pub mod health;
pub mod metrics;
pub mod notifications;
pub mod options;
pub mod request_id;
pub mod reservations;
pub mod settings;
pub mod statistics;
pub mod users;
pub mod vehicles;
