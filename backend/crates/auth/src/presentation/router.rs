//! Auth Router

use axum::{Router, routing::post};
use std::sync::Arc;

use platform::token::TokenIssuer;

use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, issuer: Arc<TokenIssuer>) -> Router {
    auth_router_generic(repo, issuer)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, issuer: Arc<TokenIssuer>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        issuer,
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
}
