use super::UserRole;

/// Filters for the admin user listing
#[derive(Debug, Clone, Default)]
pub struct GetUserDto {
    /// Case-insensitive substring over username and email
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}
