//! HTTP Handlers
//!
//! Category endpoints speak JSON; product writes arrive as multipart
//! forms carrying the image alongside the scalar fields.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::str::FromStr;
use std::sync::Arc;

use platform::token::TokenIssuer;

use crate::application::{
    CategoryService, NewProduct, ProductService, ProductUpdate, UploadStore, UploadedFile,
};
use crate::domain::{CategoryId, CategoryRepository, ProductId, ProductRepository};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    CategoryRequest, CategoryResponse, DeleteResponse, ProductResponse,
};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub uploads: UploadStore,
    pub issuer: Arc<TokenIssuer>,
}

fn parse_category_id(raw: &str) -> CatalogResult<CategoryId> {
    CategoryId::from_str(raw).map_err(|_| CatalogError::Validation("invalid id".to_string()))
}

fn parse_product_id(raw: &str) -> CatalogResult<ProductId> {
    ProductId::from_str(raw).map_err(|_| CatalogError::Validation("invalid id".to_string()))
}

// ---------------------------------------------------------------------------
// Categories

/// POST /categories
pub async fn create_category<R>(
    State(state): State<CatalogAppState<R>>,
    Json(req): Json<CategoryRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let service = CategoryService::new(state.repo.clone());
    let category = service.create(req.name).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// GET /categories
pub async fn list_categories<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<Vec<CategoryResponse>>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let service = CategoryService::new(state.repo.clone());
    let categories = service.list().await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// GET /categories/{id}
pub async fn get_category<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<CategoryResponse>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let service = CategoryService::new(state.repo.clone());
    let category = service.get(parse_category_id(&id)?).await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// PATCH /categories/{id}
pub async fn update_category<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<CategoryRequest>,
) -> CatalogResult<Json<CategoryResponse>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let service = CategoryService::new(state.repo.clone());
    let category = service.update(parse_category_id(&id)?, req.name).await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// DELETE /categories/{id}
pub async fn delete_category<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<DeleteResponse>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let service = CategoryService::new(state.repo.clone());
    service.delete(parse_category_id(&id)?).await?;
    Ok(Json(DeleteResponse::new("category deleted")))
}

// ---------------------------------------------------------------------------
// Products

/// Scalar and file fields pulled out of a product multipart form.
#[derive(Default)]
struct ProductForm {
    category_id: Option<CategoryId>,
    name: Option<String>,
    price: Option<f64>,
    picture: Option<UploadedFile>,
}

async fn read_product_form(mut multipart: Multipart) -> CatalogResult<ProductForm> {
    let mut form = ProductForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CatalogError::Validation(e.to_string()))?
    {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };
        match field_name.as_str() {
            "category_id" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| CatalogError::Validation(e.to_string()))?;
                form.category_id = Some(CategoryId::from_str(raw.trim()).map_err(|_| {
                    CatalogError::Validation("invalid category id".to_string())
                })?);
            }
            "name" => {
                form.name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| CatalogError::Validation(e.to_string()))?,
                );
            }
            "price" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| CatalogError::Validation(e.to_string()))?;
                form.price = Some(raw.trim().parse::<f64>().map_err(|_| {
                    CatalogError::Validation("price must be a number".to_string())
                })?);
            }
            "picture" => {
                let filename = field.file_name().unwrap_or("picture").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| CatalogError::Validation(e.to_string()))?;
                form.picture = Some(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }
    Ok(form)
}

fn require<T>(value: Option<T>, field: &str) -> CatalogResult<T> {
    value.ok_or_else(|| CatalogError::Validation(format!("{field} is required")))
}

/// POST /products
pub async fn create_product<R>(
    State(state): State<CatalogAppState<R>>,
    multipart: Multipart,
) -> CatalogResult<impl IntoResponse>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let form = read_product_form(multipart).await?;
    let input = NewProduct {
        category_id: require(form.category_id, "category_id")?,
        name: require(form.name, "name")?,
        price: require(form.price, "price")?,
        picture: require(form.picture, "picture")?,
    };

    let service = ProductService::new(state.repo.clone(), state.uploads.clone());
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// GET /products
pub async fn list_products<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<Vec<ProductResponse>>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let service = ProductService::new(state.repo.clone(), state.uploads.clone());
    let products = service.list().await?;
    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// GET /products/{id}
pub async fn get_product<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<ProductResponse>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let service = ProductService::new(state.repo.clone(), state.uploads.clone());
    let product = service.get(parse_product_id(&id)?).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// PATCH /products/{id}
pub async fn update_product<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> CatalogResult<Json<ProductResponse>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let form = read_product_form(multipart).await?;
    let update = ProductUpdate {
        category_id: require(form.category_id, "category_id")?,
        name: require(form.name, "name")?,
        price: require(form.price, "price")?,
        picture: form.picture,
    };

    let service = ProductService::new(state.repo.clone(), state.uploads.clone());
    let product = service.update(parse_product_id(&id)?, update).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// DELETE /products/{id}
pub async fn delete_product<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<DeleteResponse>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let service = ProductService::new(state.repo.clone(), state.uploads.clone());
    service.delete(parse_product_id(&id)?).await?;
    Ok(Json(DeleteResponse::new("product deleted")))
}
