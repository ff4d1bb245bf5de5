//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod notification_repository;
pub mod rental_option_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod settings_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::UserRepository;
