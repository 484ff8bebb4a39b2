//! Catalog Error Types
//!
//! Catalog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::token::TokenError;
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Entity does not exist
    #[error("{0}")]
    NotFound(&'static str),

    /// Malformed or missing request fields
    #[error("{0}")]
    Validation(String),

    /// No bearer token on a protected route
    #[error("authentication required")]
    MissingToken,

    /// Bearer token verification failure
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Attachment could not be written to or removed from durable storage
    #[error("failed to save file")]
    Upload(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::MissingToken | CatalogError::Token(_) => StatusCode::UNAUTHORIZED,
            CatalogError::Upload(_) | CatalogError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::Validation(_) => ErrorKind::BadRequest,
            CatalogError::MissingToken | CatalogError::Token(_) => ErrorKind::Unauthorized,
            CatalogError::Upload(_) | CatalogError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError with an opaque user-facing message.
    ///
    /// Storage failures never leak raw driver text; the source travels
    /// only into the logs.
    pub fn into_app_error(self) -> AppError {
        match self {
            CatalogError::Database(e) => {
                AppError::internal("internal server error").with_source(e)
            }
            CatalogError::Upload(e) => AppError::internal("failed to save file").with_source(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Upload(e) => {
                tracing::error!(error = %e, "Upload storage error");
            }
            CatalogError::Token(e) => {
                tracing::warn!(error = %e, "Token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CatalogError::NotFound("product not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::Validation("name is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::MissingToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            CatalogError::Token(TokenError::BadSignature).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_storage_errors_are_opaque() {
        let err = CatalogError::Database(sqlx::Error::PoolClosed);
        let app = err.into_app_error();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.message(), "internal server error");
    }
}
