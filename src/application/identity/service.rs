//! User management service — application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, GetUserDto, UpdateUserDto, User,
    UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::PaginatedResult;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// User service — orchestrates all identity / user-management use-cases.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate user by username/email + password and return a JWT.
    pub async fn login(&self, username_or_email: &str, password: &str) -> DomainResult<AuthResult> {
        // Try username first, then email
        let user = self
            .repo
            .get_user_by_username(username_or_email)
            .await?
            .or(self.repo.get_user_by_email(username_or_email).await?);

        let Some(user) = user else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        if !verify_password(password, &user.password_hash) {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let role_str = role_to_str(&user.role);

        let token = create_token(&user.id, &user.username, role_str, &self.jwt_config)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        self.repo.touch_last_login(&user.id).await?;

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Self-service registration. New accounts are always customers.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<User> {
        self.create_user(CreateUserDto {
            username: username.to_string(),
            email: email.to_string(),
            role: None,
            password: password.to_string(),
        })
        .await
    }

    /// Create a user with an explicit role. Used by admin management and
    /// the first-run seed.
    pub async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        // Validation
        if dto.username.len() < 3 || dto.username.len() > 50 {
            return Err(DomainError::Validation(
                "Username must be 3-50 characters".into(),
            ));
        }
        if dto.password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }
        if !dto.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }

        // Check uniqueness
        if self.repo.get_user_by_username(&dto.username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
        if self.repo.get_user_by_email(&dto.email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let username = dto.username.clone();
        self.repo.create_user(dto).await?;

        // Fetch the newly created user
        let user = self
            .repo
            .get_user_by_username(&username)
            .await?
            .ok_or_else(|| {
                DomainError::Validation("User created but could not be retrieved".into())
            })?;

        info!(user_id = %user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    /// Create the default administrator when the user table is empty.
    /// Returns true when the seed ran.
    pub async fn seed_admin_if_empty(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<bool> {
        if self.repo.count_users().await? > 0 {
            return Ok(false);
        }

        self.create_user(CreateUserDto {
            username: username.to_string(),
            email: email.to_string(),
            role: Some(UserRole::Admin),
            password: password.to_string(),
        })
        .await?;

        info!(username, "Default administrator created");
        Ok(true)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// List users with search, filtering and pagination.
    pub async fn list_users(&self, dto: GetUserDto) -> DomainResult<PaginatedResult<User>> {
        self.repo.list_users(dto).await
    }

    /// Get a single user by ID.
    pub async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        self.repo.get_user_by_id(id).await
    }

    /// Get user by username.
    pub async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        self.repo.get_user_by_username(username).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Update user fields (email, role, active flag, password).
    pub async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        if let Some(ref password) = dto.password {
            if password.len() < 8 {
                return Err(DomainError::Validation(
                    "Password must be at least 8 characters".into(),
                ));
            }
        }
        self.repo.update_user(id, dto).await
    }

    /// Change a user's password. Verifies the current password first.
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if new_password.len() < 8 {
            return Err(DomainError::Validation(
                "New password must be at least 8 characters".into(),
            ));
        }

        let user = self
            .repo
            .get_user_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;

        if !verify_password(current_password, &user.password_hash) {
            return Err(DomainError::Unauthorized("Invalid current password".into()));
        }

        let new_hash = hash_password(new_password)?;

        self.repo.update_user_password(user_id, &new_hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    /// Delete a user. Acting administrators cannot delete themselves.
    pub async fn delete_user(&self, id: &str, acting_user_id: &str) -> DomainResult<()> {
        if id == acting_user_id {
            return Err(DomainError::Validation(
                "You cannot delete your own account".into(),
            ));
        }
        self.repo.delete_user(id).await
    }
}

// ── Helpers ─────────────────────────────────────────────────────

pub fn role_to_str(role: &UserRole) -> &'static str {
    match role {
        UserRole::Admin => "admin",
        UserRole::Customer => "customer",
    }
}

pub fn str_to_role(s: &str) -> UserRole {
    match s.to_lowercase().as_str() {
        "admin" => UserRole::Admin,
        _ => UserRole::Customer,
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use crate::infrastructure::storage::InMemoryRepositories;

    fn service() -> UserService<InMemoryRepositories> {
        UserService::new(
            Arc::new(InMemoryRepositories::new()),
            JwtConfig::new("test-secret-key", 24),
        )
    }

    #[tokio::test]
    async fn register_then_login() {
        let svc = service();
        let user = svc
            .register("alice", "alice@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Customer);
        assert!(user.last_login_at.is_none());

        let auth = svc.login("alice", "password123").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.expires_in, 24 * 3600);

        // login by email works too, and stamps last_login
        svc.login("alice@example.com", "password123").await.unwrap();
        let user = svc.get_user_by_username("alice").await.unwrap().unwrap();
        assert!(user.last_login_at.is_some());
    }

    #[tokio::test]
    async fn wrong_password_rejected() {
        let svc = service();
        svc.register("alice", "alice@example.com", "password123")
            .await
            .unwrap();
        let err = svc.login("alice", "nope-nope-nope").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn disabled_account_cannot_login() {
        let svc = service();
        let user = svc
            .register("alice", "alice@example.com", "password123")
            .await
            .unwrap();

        svc.update_user(
            &user.id,
            UpdateUserDto {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = svc.login("alice", "password123").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let svc = service();
        svc.register("alice", "alice@example.com", "password123")
            .await
            .unwrap();
        let err = svc
            .register("alice", "other@example.com", "password123")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn weak_registration_rejected() {
        let svc = service();
        assert!(svc.register("al", "a@b.com", "password123").await.is_err());
        assert!(svc.register("alice", "nomail", "password123").await.is_err());
        assert!(svc.register("alice", "a@b.com", "short").await.is_err());
    }

    #[tokio::test]
    async fn change_password_requires_current() {
        let svc = service();
        let user = svc
            .register("alice", "alice@example.com", "password123")
            .await
            .unwrap();

        let err = svc
            .change_password(&user.id, "wrong-password", "newpassword1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        svc.change_password(&user.id, "password123", "newpassword1")
            .await
            .unwrap();
        assert!(svc.login("alice", "newpassword1").await.is_ok());
    }

    #[tokio::test]
    async fn self_delete_guard() {
        let svc = service();
        let alice = svc
            .register("alice", "alice@example.com", "password123")
            .await
            .unwrap();
        let bob = svc
            .register("bob", "bob@example.com", "password123")
            .await
            .unwrap();

        let err = svc.delete_user(&alice.id, &alice.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        svc.delete_user(&bob.id, &alice.id).await.unwrap();
        assert!(svc.get_user_by_id(&bob.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seed_runs_only_on_empty_table() {
        let svc = service();
        assert!(svc
            .seed_admin_if_empty("admin", "admin@example.com", "changeme123")
            .await
            .unwrap());

        let admin = svc.get_user_by_username("admin").await.unwrap().unwrap();
        assert_eq!(admin.role, UserRole::Admin);

        assert!(!svc
            .seed_admin_if_empty("admin2", "admin2@example.com", "changeme123")
            .await
            .unwrap());
    }
}
