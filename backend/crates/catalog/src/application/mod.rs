//! Application Layer
//!
//! Use-case services orchestrating the domain and the upload store.

pub mod categories;
pub mod products;
pub mod upload;

// Re-exports
pub use categories::CategoryService;
pub use products::{NewProduct, ProductService, ProductUpdate};
pub use upload::{UploadStore, UploadedFile};
