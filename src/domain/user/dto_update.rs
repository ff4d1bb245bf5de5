use super::UserRole;

/// Partial update applied by administrators; absent fields keep their value
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    /// Plaintext; hashed on update
    pub password: Option<String>,
}
