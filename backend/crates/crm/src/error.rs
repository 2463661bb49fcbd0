//! CRM Error Types
//!
//! Integrates with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// CRM-specific result type alias
pub type CrmResult<T> = Result<T, CrmError>;

/// CRM-specific error variants
///
/// The not-found variants also cover "exists but belongs to another user".
#[derive(Debug, Error)]
pub enum CrmError {
    #[error("Client not found")]
    ClientNotFound,

    #[error("Order not found")]
    OrderNotFound,

    #[error("Payment not found")]
    PaymentNotFound,

    /// Field validation failed before any store logic ran
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CrmError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CrmError::ClientNotFound | CrmError::OrderNotFound | CrmError::PaymentNotFound => {
                StatusCode::NOT_FOUND
            }
            CrmError::Validation(_) => StatusCode::BAD_REQUEST,
            CrmError::Database(_) | CrmError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CrmError::ClientNotFound | CrmError::OrderNotFound | CrmError::PaymentNotFound => {
                ErrorKind::NotFound
            }
            CrmError::Validation(_) => ErrorKind::BadRequest,
            CrmError::Database(_) | CrmError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError, hiding server-side causes
    pub fn to_app_error(&self) -> AppError {
        match self {
            CrmError::Database(_) | CrmError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            CrmError::Database(e) => {
                tracing::error!(error = %e, "CRM database error");
            }
            CrmError::Internal(msg) => {
                tracing::error!(message = %msg, "CRM internal error");
            }
            _ => {
                tracing::debug!(error = %self, "CRM error");
            }
        }
    }
}

impl IntoResponse for CrmError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        assert_eq!(CrmError::ClientNotFound.to_string(), "Client not found");
        assert_eq!(CrmError::OrderNotFound.to_string(), "Order not found");
        assert_eq!(CrmError::PaymentNotFound.to_string(), "Payment not found");
        assert_eq!(CrmError::OrderNotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err = CrmError::Validation("Price cannot be negative".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_app_error().message(), "Price cannot be negative");
    }

    #[test]
    fn test_database_error_is_opaque() {
        let err = CrmError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }
}
