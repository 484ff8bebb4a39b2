//! User Entity
//!
//! A user is created once at registration and never updated or deleted;
//! no mutating operations exist on the credential store.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_id::UserId, user_password::UserPassword};

/// User entity
///
/// Owned exclusively by the credential store. The password hash never
/// leaves the auth services; public views expose name and email only.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Email (unique, stored exactly as given)
    pub email: Email,
    /// Argon2id PHC hash
    pub password_hash: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user at registration time
    pub fn new(name: String, email: Email, password_hash: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
