//! Domain Layer
//!
//! Entities, value objects, and repository traits for the catalog.

pub mod entities;
pub mod repository;
pub mod value_objects;

// Re-exports
pub use entities::{Category, Product};
pub use repository::{CategoryRepository, ProductRepository};
pub use value_objects::{CategoryId, Price, ProductId};
