//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.
//!
//! Every response error uses the same envelope, `{"error": <ErrorRecord>}`.
//! Catalogued failures ([`ApiError`]) are additionally stashed in the response
//! extensions so the error-envelope middleware can upsert their record.

pub mod api_error;
pub mod catalog;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::ErrorRecord;

pub use api_error::{derive_api_code, ApiError, GENERIC_MESSAGE};
pub use catalog::{CatalogEntry, UnknownErrorCode};

/// API code reported for failures outside the catalog contract
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Domain rule violation with a stable API code
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: ErrorRecord,
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Api(e) => e.status(),
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for client
    pub fn api_code(&self) -> &str {
        match self {
            AppError::Api(e) => e.api_code(),
            AppError::Database(_) | AppError::Internal(_) => INTERNAL_ERROR,
        }
    }

    /// The catalogued failure, if this is one
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            AppError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Get user-facing record (hides internal details)
    fn to_record(&self) -> ErrorRecord {
        match self {
            AppError::Api(e) => e.to_record(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                internal_record()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                internal_record()
            }
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

fn internal_record() -> ErrorRecord {
    ErrorRecord {
        code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        api_code: INTERNAL_ERROR.to_string(),
        name: "Internal Server Error".to_string(),
        description: "An internal error occurred".to_string(),
        info: None,
    }
}

impl From<UnknownErrorCode> for AppError {
    fn from(err: UnknownErrorCode) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorEnvelope {
            error: self.to_record(),
        };

        let mut response = (status, Json(body)).into_response();
        if let AppError::Api(api_error) = self {
            response.extensions_mut().insert(api_error);
        }
        response
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_passes_through() {
        let err = AppError::from(ApiError::invalid_cpf());
        assert_eq!(err.status(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(err.api_code(), catalog::INVALID_CPF);
        assert!(err.as_api().is_some());
    }

    #[test]
    fn test_database_error_is_internal() {
        let err = AppError::from(sea_orm::DbErr::Custom("boom".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.api_code(), INTERNAL_ERROR);
        assert!(err.as_api().is_none());
    }

    #[test]
    fn test_response_carries_api_error_extension() {
        let response = AppError::from(ApiError::user_already_exists()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let stashed = response.extensions().get::<ApiError>().unwrap();
        assert_eq!(stashed.api_code(), catalog::USER_ALREADY_EXISTS);
    }

    #[test]
    fn test_internal_response_has_no_extension() {
        let response = AppError::internal("oops").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<ApiError>().is_none());
    }
}
