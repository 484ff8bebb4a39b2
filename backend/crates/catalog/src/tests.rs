//! Catalog crate tests
//!
//! Use cases exercised against in-memory repositories and a temp-dir
//! upload store.

use std::sync::{Arc, Mutex};

use crate::application::{
    CategoryService, NewProduct, ProductService, ProductUpdate, UploadStore, UploadedFile,
};
use crate::domain::{
    Category, CategoryId, CategoryRepository, Product, ProductId, ProductRepository,
};
use crate::error::{CatalogError, CatalogResult};

#[derive(Clone, Default)]
struct InMemoryCatalog {
    categories: Arc<Mutex<Vec<Category>>>,
    products: Arc<Mutex<Vec<Product>>>,
}

impl CategoryRepository for InMemoryCatalog {
    async fn create(&self, category: &Category) -> CatalogResult<()> {
        self.categories.lock().unwrap().push(category.clone());
        Ok(())
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        let mut all = self.categories.lock().unwrap().clone();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_id(&self, category_id: CategoryId) -> CatalogResult<Option<Category>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.category_id == category_id)
            .cloned())
    }

    async fn update(&self, category: &Category) -> CatalogResult<bool> {
        let mut categories = self.categories.lock().unwrap();
        match categories
            .iter_mut()
            .find(|c| c.category_id == category.category_id)
        {
            Some(existing) => {
                *existing = category.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, category_id: CategoryId) -> CatalogResult<bool> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.category_id != category_id);
        Ok(categories.len() < before)
    }
}

impl ProductRepository for InMemoryCatalog {
    async fn create(&self, product: &Product) -> CatalogResult<()> {
        self.products.lock().unwrap().push(product.clone());
        Ok(())
    }

    async fn list(&self) -> CatalogResult<Vec<Product>> {
        let mut all = self.products.lock().unwrap().clone();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_id(&self, product_id: ProductId) -> CatalogResult<Option<Product>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.product_id == product_id)
            .cloned())
    }

    async fn update(&self, product: &Product) -> CatalogResult<bool> {
        let mut products = self.products.lock().unwrap();
        match products
            .iter_mut()
            .find(|p| p.product_id == product.product_id)
        {
            Some(existing) => {
                *existing = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, product_id: ProductId) -> CatalogResult<bool> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.product_id != product_id);
        Ok(products.len() < before)
    }
}

/// Product store whose writes always fail, for exercising upload
/// compensation.
#[derive(Clone, Default)]
struct BrokenProducts;

impl ProductRepository for BrokenProducts {
    async fn create(&self, _product: &Product) -> CatalogResult<()> {
        Err(CatalogError::Database(sqlx::Error::PoolClosed))
    }

    async fn list(&self) -> CatalogResult<Vec<Product>> {
        Err(CatalogError::Database(sqlx::Error::PoolClosed))
    }

    async fn find_by_id(&self, _product_id: ProductId) -> CatalogResult<Option<Product>> {
        Err(CatalogError::Database(sqlx::Error::PoolClosed))
    }

    async fn update(&self, _product: &Product) -> CatalogResult<bool> {
        Err(CatalogError::Database(sqlx::Error::PoolClosed))
    }

    async fn delete(&self, _product_id: ProductId) -> CatalogResult<bool> {
        Err(CatalogError::Database(sqlx::Error::PoolClosed))
    }
}

async fn temp_uploads() -> UploadStore {
    let dir = std::env::temp_dir().join(format!("catalog-test-{}", uuid::Uuid::new_v4()));
    let store = UploadStore::new(dir);
    store.ensure_dir().await.unwrap();
    store
}

fn picture(name: &str) -> UploadedFile {
    UploadedFile {
        filename: name.to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF],
    }
}

fn stored_files(store: &UploadStore) -> Vec<String> {
    std::fs::read_dir(store.dir())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

mod categories {
    use super::*;

    #[tokio::test]
    async fn test_create_then_get_roundtrip() {
        let repo = Arc::new(InMemoryCatalog::default());
        let service = CategoryService::new(repo);

        let created = service.create("  Drinks  ".to_string()).await.unwrap();
        assert_eq!(created.name, "Drinks");

        let fetched = service.get(created.category_id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let repo = Arc::new(InMemoryCatalog::default());
        let service = CategoryService::new(repo);

        let err = service.create("   ".to_string()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let repo = Arc::new(InMemoryCatalog::default());
        let service = CategoryService::new(repo);

        service.create("Snacks".to_string()).await.unwrap();
        service.create("Drinks".to_string()).await.unwrap();

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Drinks", "Snacks"]);
    }

    #[tokio::test]
    async fn test_delete_removes_and_is_idempotent() {
        let repo = Arc::new(InMemoryCatalog::default());
        let service = CategoryService::new(repo);

        let created = service.create("Drinks".to_string()).await.unwrap();
        service.delete(created.category_id).await.unwrap();

        let err = service.get(created.category_id).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));

        // Second delete is still a success
        service.delete(created.category_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_category_is_not_found() {
        let repo = Arc::new(InMemoryCatalog::default());
        let service = CategoryService::new(repo);

        let err = service
            .update(CategoryId::new(), "Drinks".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }
}

mod products {
    use super::*;

    fn new_product(category_id: CategoryId, name: &str, price: f64) -> NewProduct {
        NewProduct {
            category_id,
            name: name.to_string(),
            price,
            picture: picture("menu.jpg"),
        }
    }

    #[tokio::test]
    async fn test_create_stores_file_then_row() {
        let repo = Arc::new(InMemoryCatalog::default());
        let uploads = temp_uploads().await;
        let service = ProductService::new(repo.clone(), uploads.clone());

        let product = service
            .create(new_product(CategoryId::new(), "Iced Tea", 3.5))
            .await
            .unwrap();

        assert!(product.picture.starts_with("uploads/"));
        assert!(product.picture.ends_with(".jpg"));

        let files = stored_files(&uploads);
        assert_eq!(files.len(), 1);
        assert_eq!(format!("uploads/{}", files[0]), product.picture);

        let fetched = service.get(product.product_id).await.unwrap();
        assert_eq!(fetched.picture, product.picture);
    }

    #[tokio::test]
    async fn test_failed_row_write_removes_stored_file() {
        let uploads = temp_uploads().await;
        let service = ProductService::new(Arc::new(BrokenProducts), uploads.clone());

        let err = service
            .create(new_product(CategoryId::new(), "Iced Tea", 3.5))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Database(_)));
        assert!(stored_files(&uploads).is_empty());
    }

    #[tokio::test]
    async fn test_same_client_filename_never_collides() {
        let repo = Arc::new(InMemoryCatalog::default());
        let uploads = temp_uploads().await;
        let service = ProductService::new(repo, uploads.clone());

        let category_id = CategoryId::new();
        let first = service
            .create(new_product(category_id, "Iced Tea", 3.5))
            .await
            .unwrap();
        let second = service
            .create(new_product(category_id, "Hot Tea", 3.0))
            .await
            .unwrap();

        assert_ne!(first.picture, second.picture);
        assert_eq!(stored_files(&uploads).len(), 2);
    }

    #[tokio::test]
    async fn test_update_without_picture_preserves_path() {
        let repo = Arc::new(InMemoryCatalog::default());
        let uploads = temp_uploads().await;
        let service = ProductService::new(repo, uploads);

        let created = service
            .create(new_product(CategoryId::new(), "Iced Tea", 3.5))
            .await
            .unwrap();

        let new_category = CategoryId::new();
        let updated = service
            .update(
                created.product_id,
                ProductUpdate {
                    category_id: new_category,
                    name: "Lemon Tea".to_string(),
                    price: 4.0,
                    picture: None,
                },
            )
            .await
            .unwrap();

        // Scalar fields are fully replaced; the stored path is untouched.
        assert_eq!(updated.picture, created.picture);
        assert_eq!(updated.category_id, new_category);
        assert_eq!(updated.name, "Lemon Tea");
        assert_eq!(updated.price.get(), 4.0);
    }

    #[tokio::test]
    async fn test_update_with_picture_keeps_old_file_on_disk() {
        let repo = Arc::new(InMemoryCatalog::default());
        let uploads = temp_uploads().await;
        let service = ProductService::new(repo, uploads.clone());

        let created = service
            .create(new_product(CategoryId::new(), "Iced Tea", 3.5))
            .await
            .unwrap();

        let updated = service
            .update(
                created.product_id,
                ProductUpdate {
                    category_id: created.category_id,
                    name: created.name.clone(),
                    price: created.price.get(),
                    picture: Some(picture("new.png")),
                },
            )
            .await
            .unwrap();

        assert_ne!(updated.picture, created.picture);
        // The replaced image keeps serving previously handed-out links.
        assert_eq!(stored_files(&uploads).len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let repo = Arc::new(InMemoryCatalog::default());
        let uploads = temp_uploads().await;
        let service = ProductService::new(repo, uploads.clone());

        let err = service
            .update(
                ProductId::new(),
                ProductUpdate {
                    category_id: CategoryId::new(),
                    name: "Iced Tea".to_string(),
                    price: 3.5,
                    picture: Some(picture("new.png")),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        // Nothing was written for the failed update.
        assert!(stored_files(&uploads).is_empty());
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected_before_any_write() {
        let repo = Arc::new(InMemoryCatalog::default());
        let uploads = temp_uploads().await;
        let service = ProductService::new(repo, uploads.clone());

        let err = service
            .create(new_product(CategoryId::new(), "Iced Tea", -1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(stored_files(&uploads).is_empty());
    }

    #[tokio::test]
    async fn test_products_survive_category_deletion() {
        let repo = Arc::new(InMemoryCatalog::default());
        let uploads = temp_uploads().await;
        let categories = CategoryService::new(repo.clone());
        let products = ProductService::new(repo, uploads);

        let category = categories.create("Drinks".to_string()).await.unwrap();
        let product = products
            .create(new_product(category.category_id, "Iced Tea", 3.5))
            .await
            .unwrap();

        categories.delete(category.category_id).await.unwrap();

        let still_there = products.get(product.product_id).await.unwrap();
        assert_eq!(still_there.category_id, category.category_id);
    }
}
