//! User Password Value Object
//!
//! Domain wrapper for user passwords. Delegates cryptographic work to
//! `platform::password` (Argon2id, zeroized plaintext).

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword` with domain-specific error handling.
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation (minimum length policy).
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text =
            ClearTextPassword::new(raw).map_err(|e| AppError::bad_request(e.to_string()))?;
        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Stored hash)
// ============================================================================

/// Stored password hash (PHC string format)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(String);

impl UserPassword {
    /// Hash a raw password for storage
    pub fn from_raw(raw: &RawPassword) -> AppResult<Self> {
        let hashed = raw
            .inner()
            .hash()
            .map_err(|e| AppError::internal("password hashing failed").with_source(e))?;
        Ok(Self(hashed.as_phc_string().to_string()))
    }

    /// Create from database value (assumed already a valid PHC string)
    pub fn from_db(hash: String) -> Self {
        Self(hash)
    }

    /// Verify a raw password against this hash.
    ///
    /// A stored hash that fails to parse verifies as false; it is not a
    /// user-visible error.
    pub fn verify(&self, raw: &RawPassword) -> bool {
        match HashedPassword::from_phc_string(&self.0) {
            Ok(hash) => hash.verify(raw.inner()),
            Err(_) => false,
        }
    }

    /// Get the PHC string for storage
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let stored = UserPassword::from_raw(&raw).unwrap();

        assert_ne!(stored.as_str(), "secret1");
        assert!(stored.verify(&raw));

        let wrong = RawPassword::new("secret2".to_string()).unwrap();
        assert!(!stored.verify(&wrong));
    }

    #[test]
    fn test_short_password_rejected() {
        let err = RawPassword::new("abc".to_string()).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_garbage_hash_verifies_false() {
        let stored = UserPassword::from_db("not-a-phc-string".to_string());
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        assert!(!stored.verify(&raw));
    }
}
