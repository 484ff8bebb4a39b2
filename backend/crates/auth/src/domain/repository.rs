//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
///
/// The store's unique constraint on email is the authoritative uniqueness
/// guard: `create` must fail with `AuthError::EmailTaken` on a constraint
/// violation even when a prior `exists_by_email` check passed, since two
/// concurrent registrations can both pass the check.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if an email is already registered (advisory pre-check only)
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}
