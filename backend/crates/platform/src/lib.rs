//! Platform Services
//!
//! Cryptographic building blocks shared across domain crates.
//! Domain crates wrap these in their own value objects; nothing in here
//! knows about HTTP or the database.

pub mod password;
pub mod token;
