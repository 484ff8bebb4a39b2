//! Catalog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and the upload store
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, middleware, routers
//!
//! ## Features
//! - Category CRUD over JSON
//! - Product CRUD over multipart forms with image upload
//! - Bearer-token guard on every mutation; reads stay public
//!
//! ## Consistency Model
//! - Product writes store the image first, then the row; a failed row
//!   write removes the fresh file so no orphan is left behind
//! - Images replaced by an update are kept on disk and keep serving
//!   previously handed-out links
//! - `category_id` on products is a plain reference; category deletion
//!   never cascades

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{CategoryService, ProductService, UploadStore};
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::{categories_router, products_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgCatalogRepository as CatalogStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
