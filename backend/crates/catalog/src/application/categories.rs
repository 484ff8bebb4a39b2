//! Category Use Cases

use std::sync::Arc;

use crate::domain::{Category, CategoryId, CategoryRepository};
use crate::error::{CatalogError, CatalogResult};

/// CRUD operations over categories.
pub struct CategoryService<R>
where
    R: CategoryRepository,
{
    repo: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, name: String) -> CatalogResult<Category> {
        let name = validated_name(name)?;
        let category = Category::new(name);
        self.repo.create(&category).await?;
        tracing::info!(category_id = %category.category_id, "category created");
        Ok(category)
    }

    pub async fn list(&self) -> CatalogResult<Vec<Category>> {
        self.repo.list().await
    }

    pub async fn get(&self, category_id: CategoryId) -> CatalogResult<Category> {
        self.repo
            .find_by_id(category_id)
            .await?
            .ok_or(CatalogError::NotFound("category not found"))
    }

    pub async fn update(&self, category_id: CategoryId, name: String) -> CatalogResult<Category> {
        let name = validated_name(name)?;
        let mut category = self.get(category_id).await?;
        category.name = name;
        if !self.repo.update(&category).await? {
            return Err(CatalogError::NotFound("category not found"));
        }
        Ok(category)
    }

    /// Deleting an unknown id succeeds; the end state is the same.
    pub async fn delete(&self, category_id: CategoryId) -> CatalogResult<()> {
        let removed = self.repo.delete(category_id).await?;
        if removed {
            tracing::info!(%category_id, "category deleted");
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
