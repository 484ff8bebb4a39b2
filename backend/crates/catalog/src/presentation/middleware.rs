//! Bearer Token Guard
//!
//! Route-layer middleware protecting catalog mutations. Read endpoints
//! stay public.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::{CategoryRepository, ProductRepository};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::handlers::CatalogAppState;

/// Verified token subject, attached to the request for handlers that
/// want to know who acted.
#[derive(Debug, Clone)]
pub struct AuthSubject(pub String);

pub async fn require_auth<R>(
    State(state): State<CatalogAppState<R>>,
    mut request: Request,
    next: Next,
) -> CatalogResult<Response>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
{
    let token = bearer_token(&request).ok_or(CatalogError::MissingToken)?;
    let subject = state.issuer.verify(token)?;
    request.extensions_mut().insert(AuthSubject(subject));
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
