//! Catalog Value Objects

use crate::error::{CatalogError, CatalogResult};

// Typed entity IDs from the shared kernel
pub use kernel::id::{CategoryId, ProductId};

/// Non-negative product price
///
/// Stored as a double, matching the persistence representation. NaN and
/// infinities are rejected along with negative values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> CatalogResult<Self> {
        if !value.is_finite() {
            return Err(CatalogError::Validation("price must be a number".to_string()));
        }
        if value < 0.0 {
            return Err(CatalogError::Validation(
                "price must not be negative".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: f64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
