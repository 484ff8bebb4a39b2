//! Catalog Routers
//!
//! Reads are public; mutations sit behind the bearer-token guard via a
//! route layer on a separate sub-router merged with the public one.

use axum::routing::{get, patch, post};
use axum::{Router, middleware};
use std::sync::Arc;

use platform::token::TokenIssuer;

use crate::application::UploadStore;
use crate::domain::{CategoryRepository, ProductRepository};
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};
use crate::presentation::middleware::require_auth;

/// Create the categories router with PostgreSQL repository
pub fn categories_router(
    repo: PgCatalogRepository,
    uploads: UploadStore,
    issuer: Arc<TokenIssuer>,
) -> Router {
    categories_router_generic(CatalogAppState {
        repo: Arc::new(repo),
        uploads,
        issuer,
    })
}

/// Create the products router with PostgreSQL repository
pub fn products_router(
    repo: PgCatalogRepository,
    uploads: UploadStore,
    issuer: Arc<TokenIssuer>,
) -> Router {
    products_router_generic(CatalogAppState {
        repo: Arc::new(repo),
        uploads,
        issuer,
    })
}

/// Create a generic categories router for any repository implementation
pub fn categories_router_generic<R>(state: CatalogAppState<R>) -> Router
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let public = Router::new()
        .route("/", get(handlers::list_categories::<R>))
        .route("/{id}", get(handlers::get_category::<R>));

    let protected = Router::new()
        .route("/", post(handlers::create_category::<R>))
        .route(
            "/{id}",
            patch(handlers::update_category::<R>).delete(handlers::delete_category::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<R>,
        ));

    public.merge(protected).with_state(state)
}

/// Create a generic products router for any repository implementation
pub fn products_router_generic<R>(state: CatalogAppState<R>) -> Router
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let public = Router::new()
        .route("/", get(handlers::list_products::<R>))
        .route("/{id}", get(handlers::get_product::<R>));

    let protected = Router::new()
        .route("/", post(handlers::create_product::<R>))
        .route(
            "/{id}",
            patch(handlers::update_product::<R>).delete(handlers::delete_product::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<R>,
        ));

    public.merge(protected).with_state(state)
}
