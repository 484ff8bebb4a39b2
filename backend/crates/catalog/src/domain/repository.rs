//! Catalog Repository Interfaces

use super::entities::{Category, Product};
use super::value_objects::{CategoryId, ProductId};
use crate::error::CatalogResult;

/// Category persistence operations
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    async fn create(&self, category: &Category) -> CatalogResult<()>;
    async fn list(&self) -> CatalogResult<Vec<Category>>;
    async fn find_by_id(&self, category_id: CategoryId) -> CatalogResult<Option<Category>>;
    async fn update(&self, category: &Category) -> CatalogResult<bool>;
    /// Returns whether a row was removed. Deleting a missing category is
    /// not an error.
    async fn delete(&self, category_id: CategoryId) -> CatalogResult<bool>;
}

/// Product persistence operations
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    async fn create(&self, product: &Product) -> CatalogResult<()>;
    async fn list(&self) -> CatalogResult<Vec<Product>>;
    async fn find_by_id(&self, product_id: ProductId) -> CatalogResult<Option<Product>>;
    async fn update(&self, product: &Product) -> CatalogResult<bool>;
    async fn delete(&self, product_id: ProductId) -> CatalogResult<bool>;
}
