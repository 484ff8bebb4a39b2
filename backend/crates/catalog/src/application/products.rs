//! Product Use Cases
//!
//! Product writes are two-phase: the image is written to the upload store
//! first, then the row is persisted. If the row write fails the freshly
//! stored file is removed so no orphan is left behind. Images replaced by
//! an update stay on disk and keep serving old links.

use std::sync::Arc;

use crate::application::upload::{UploadStore, UploadedFile};
use crate::domain::{CategoryId, Price, Product, ProductId, ProductRepository};
use crate::error::{CatalogError, CatalogResult};

/// Validated input for creating a product.
#[derive(Debug)]
pub struct NewProduct {
    pub category_id: CategoryId,
    pub name: String,
    pub price: f64,
    pub picture: UploadedFile,
}

/// Validated input for updating a product. The scalar fields fully
/// replace their current values; only the picture may be omitted, in
/// which case the stored path is kept as-is.
#[derive(Debug)]
pub struct ProductUpdate {
    pub category_id: CategoryId,
    pub name: String,
    pub price: f64,
    pub picture: Option<UploadedFile>,
}

pub struct ProductService<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
    uploads: UploadStore,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: Arc<R>, uploads: UploadStore) -> Self {
        Self { repo, uploads }
    }

    pub async fn create(&self, input: NewProduct) -> CatalogResult<Product> {
        let name = validated_name(input.name)?;
        let price = Price::new(input.price)?;

        let picture = self.uploads.store(&input.picture).await?;
        let product = Product::new(input.category_id, name, price, picture);
        if let Err(err) = self.repo.create(&product).await {
            self.uploads.remove(&product.picture).await;
            return Err(err);
        }
        tracing::info!(product_id = %product.product_id, "product created");
        Ok(product)
    }

    pub async fn list(&self) -> CatalogResult<Vec<Product>> {
        self.repo.list().await
    }

    pub async fn get(&self, product_id: ProductId) -> CatalogResult<Product> {
        self.repo
            .find_by_id(product_id)
            .await?
            .ok_or(CatalogError::NotFound("product not found"))
    }

    pub async fn update(&self, product_id: ProductId, input: ProductUpdate) -> CatalogResult<Product> {
        let mut product = self.get(product_id).await?;

        product.category_id = input.category_id;
        product.name = validated_name(input.name)?;
        product.price = Price::new(input.price)?;

        let new_picture = match input.picture {
            Some(file) => Some(self.uploads.store(&file).await?),
            None => None,
        };
        if let Some(picture) = &new_picture {
            product.picture = picture.clone();
        }

        match self.repo.update(&product).await {
            Ok(true) => Ok(product),
            Ok(false) => {
                // Row vanished between read and write; drop the new file.
                if let Some(picture) = &new_picture {
                    self.uploads.remove(picture).await;
                }
                Err(CatalogError::NotFound("product not found"))
            }
            Err(err) => {
                if let Some(picture) = &new_picture {
                    self.uploads.remove(picture).await;
                }
                Err(err)
            }
        }
    }

    pub async fn delete(&self, product_id: ProductId) -> CatalogResult<()> {
        let removed = self.repo.delete(product_id).await?;
        if removed {
            tracing::info!(%product_id, "product deleted");
        }
        Ok(())
    }
}

fn validated_name(name: String) -> CatalogResult<String> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(CatalogError::Validation("name must not be empty".to_string()));
    }
    Ok(name)
}
