use super::UserRole;

/// Payload for inserting a new user
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    pub email: String,
    /// Defaults to `Customer` when absent
    pub role: Option<UserRole>,
    /// Plaintext; hashed on insert
    pub password: String,
}
