//! Infrastructure Layer

pub mod postgres;

// Re-exports
pub use postgres::PgCatalogRepository;
