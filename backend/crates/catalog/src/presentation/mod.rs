//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

// Re-exports
pub use handlers::CatalogAppState;
pub use middleware::AuthSubject;
pub use router::{categories_router, products_router};
