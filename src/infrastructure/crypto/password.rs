//! Password hashing at the crypto boundary
//!
//! bcrypt failures surface as `DomainError`; nothing outside this module
//! sees the bcrypt error type.

use bcrypt::DEFAULT_COST;

use crate::domain::{DomainError, DomainResult};

/// Hash a plaintext password with bcrypt at the default cost.
pub fn hash_password(plain: &str) -> DomainResult<String> {
    bcrypt::hash(plain, DEFAULT_COST)
        .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash reads as a mismatch rather than an error, so
/// a corrupt row fails the login instead of surfacing a 500.
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    bcrypt::verify(plain, stored_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_the_right_password() {
        let hashed = hash_password("secure_password_123").unwrap();
        assert!(verify_password("secure_password_123", &hashed));
        assert!(!verify_password("wrong_password", &hashed));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same_input").unwrap();
        let b = hash_password("same_input").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same_input", &a));
        assert!(verify_password("same_input", &b));
    }

    #[test]
    fn malformed_stored_hash_reads_as_mismatch() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }
}
