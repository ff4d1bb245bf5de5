//! User domain entity

use chrono::{DateTime, Utc};

/// User role
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRole {
    /// Manages the fleet, catalog and reservations
    Admin,
    /// Books vehicles through the storefront
    Customer,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Customer
    }
}

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
