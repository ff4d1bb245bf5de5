//! User aggregate
//!
//! Account model, the DTOs the identity service consumes, and the
//! repository interface the infrastructure layer implements.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_get;
mod dto_update;

pub use model::{User, UserRole};

pub use dto_create::CreateUserDto;
pub use dto_get::GetUserDto;
pub use dto_update::UpdateUserDto;

pub use repository::UserRepositoryInterface;
