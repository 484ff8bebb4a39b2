//! PostgreSQL Catalog Repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    Category, CategoryId, CategoryRepository, Price, Product, ProductId, ProductRepository,
};
use crate::error::CatalogResult;

/// Catalog repository backed by PostgreSQL.
///
/// `products.category_id` carries no foreign key; deleting a category
/// leaves its products in place.
#[derive(Debug, Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: Uuid,
    name: String,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category::from_parts(CategoryId::from_uuid(self.category_id), self.name)
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    category_id: Uuid,
    name: String,
    price: f64,
    picture: String,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product::from_parts(
            ProductId::from_uuid(self.product_id),
            CategoryId::from_uuid(self.category_id),
            self.name,
            Price::from_db(self.price),
            self.picture,
        )
    }
}

impl CategoryRepository for PgCatalogRepository {
    async fn create(&self, category: &Category) -> CatalogResult<()> {
        sqlx::query("INSERT INTO categories (category_id, name) VALUES ($1, $2)")
            .bind(category.category_id.as_uuid())
            .bind(&category.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT category_id, name FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn find_by_id(&self, category_id: CategoryId) -> CatalogResult<Option<Category>> {
        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT category_id, name FROM categories WHERE category_id = $1")
                .bind(category_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(CategoryRow::into_category))
    }

    async fn update(&self, category: &Category) -> CatalogResult<bool> {
        let result = sqlx::query("UPDATE categories SET name = $2 WHERE category_id = $1")
            .bind(category.category_id.as_uuid())
            .bind(&category.name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, category_id: CategoryId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(category_id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl ProductRepository for PgCatalogRepository {
    async fn create(&self, product: &Product) -> CatalogResult<()> {
        sqlx::query(
            "INSERT INTO products (product_id, category_id, name, price, picture) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(product.product_id.as_uuid())
        .bind(product.category_id.as_uuid())
        .bind(&product.name)
        .bind(product.price.get())
        .bind(&product.picture)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self) -> CatalogResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT product_id, category_id, name, price, picture FROM products ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn find_by_id(&self, product_id: ProductId) -> CatalogResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT product_id, category_id, name, price, picture FROM products \
             WHERE product_id = $1",
        )
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ProductRow::into_product))
    }

    async fn update(&self, product: &Product) -> CatalogResult<bool> {
        let result = sqlx::query(
            "UPDATE products SET category_id = $2, name = $3, price = $4, picture = $5 \
             WHERE product_id = $1",
        )
        .bind(product.product_id.as_uuid())
        .bind(product.category_id.as_uuid())
        .bind(&product.name)
        .bind(product.price.get())
        .bind(&product.picture)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, product_id: ProductId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(product_id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
