//! Catalogued API failures.
//!
//! An [`ApiError`] is the wire contract for every domain rule violation: an
//! HTTP status, a machine-readable `api_code` and a human description. When it
//! reaches the HTTP boundary its record in the `errors` table is upserted
//! (see [`ApiError::persist`]).

use std::fmt::Display;

use axum::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use super::catalog::{self, UnknownErrorCode};
use crate::domain::ErrorRecord;
use crate::infra::ErrorRepository;

/// Message used when none is given
pub const GENERIC_MESSAGE: &str = "Generic error";

/// Runtime failure carrying everything needed to build the error envelope.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    api_code: String,
    message: String,
    info: Option<Value>,
}

/// Turn a human message into an API code: uppercase, spaces to underscores,
/// periods removed. Differently worded messages may collide on purpose.
pub fn derive_api_code(text: &str) -> String {
    text.to_uppercase().replace(' ', "_").replace('.', "")
}

impl ApiError {
    /// Create an error whose API code is derived from `message`.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status,
            api_code: derive_api_code(&message),
            message,
            info: None,
        }
    }

    /// Create an error with the default message.
    pub fn generic(status: StatusCode) -> Self {
        Self::new(status, GENERIC_MESSAGE)
    }

    /// Create an error from a catalog entry, using its default description.
    pub fn catalogued(api_code: &str) -> Result<Self, UnknownErrorCode> {
        let entry = catalog::lookup(api_code)?;
        Ok(Self {
            status: entry.status(),
            api_code: entry.api_code.to_string(),
            message: entry.description.to_string(),
            info: None,
        })
    }

    /// Override the derived API code. The code is normalized the same way.
    pub fn with_api_code(mut self, api_code: &str) -> Self {
        self.api_code = derive_api_code(api_code);
        self
    }

    /// Attach structured details returned only with this occurrence.
    pub fn with_info(mut self, info: Value) -> Self {
        self.info = Some(info);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn api_code(&self) -> &str {
        &self.api_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn info(&self) -> Option<&Value> {
        self.info.as_ref()
    }

    /// Display name: the catalog name when the code is known, else the
    /// canonical reason phrase of the status.
    pub fn name(&self) -> String {
        match catalog::lookup(&self.api_code) {
            Ok(entry) => entry.name.to_string(),
            Err(_) => self
                .status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
        }
    }

    /// Record describing this occurrence, without touching the store.
    pub fn to_record(&self) -> ErrorRecord {
        ErrorRecord {
            code: self.status.as_u16(),
            api_code: self.api_code.clone(),
            name: self.name(),
            description: self.message.clone(),
            info: self.info.clone(),
        }
    }

    /// Upsert this error's record and return it.
    ///
    /// An existing record keeps its code and name and takes this occurrence's
    /// message as description; otherwise a new record is inserted. `info` is
    /// attached to the returned value only. Never fails: a store error is
    /// logged and the unsaved record is returned instead, so the original
    /// failure still reaches the client.
    pub async fn persist(&self, errors: &dyn ErrorRepository) -> ErrorRecord {
        let mut record = match errors
            .upsert(
                &self.api_code,
                self.status.as_u16(),
                &self.name(),
                &self.message,
            )
            .await
        {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(api_code = %self.api_code, error = %e, "Failed to persist API error record");
                self.to_record()
            }
        };

        if let Some(info) = &self.info {
            record.info = Some(info.clone());
        }

        record
    }
}

// =============================================================================
// Domain failures raised by the services
// =============================================================================

impl ApiError {
    pub fn user_not_found(params: impl Display) -> Self {
        Self::new(StatusCode::NOT_FOUND, "User doesn't exist.")
            .with_api_code(catalog::USER_NOT_FOUND)
            .with_info(Value::String(format!("User not found by params {}", params)))
    }

    pub fn invalid_cpf() -> Self {
        Self::new(StatusCode::NOT_ACCEPTABLE, "The CPF provided is not valid.")
            .with_api_code(catalog::INVALID_CPF)
    }

    pub fn user_already_exists() -> Self {
        Self::new(StatusCode::CONFLICT, "User already exists.")
            .with_api_code(catalog::USER_ALREADY_EXISTS)
    }

    pub fn user_is_active() -> Self {
        Self::new(StatusCode::CONFLICT, "User is already active")
            .with_api_code(catalog::USER_IS_ACTIVE)
    }

    pub fn deactivate_forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Cannot deactivate user.")
            .with_api_code(catalog::DEACTIVATE_FORBIDDEN)
    }

    pub fn profile_forbidden_access() -> Self {
        Self::new(StatusCode::FORBIDDEN, "User cannot access")
            .with_api_code(catalog::PROFILE_FORBIDDEN_ACCESS)
    }

    pub fn requester_not_identified() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "Requester identity is missing or malformed.",
        )
        .with_api_code(catalog::REQUESTER_NOT_IDENTIFIED)
    }

    pub fn pages_not_found(page: u64, total_pages: u64) -> Self {
        Self::new(StatusCode::NOT_FOUND, "No page generated")
            .with_api_code(catalog::PAGES_NOT_FOUND)
            .with_info(json!({ "page": page, "total_pages": total_pages }))
    }

    pub fn invalid_filter_value(field: &str, value: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid filter value.")
            .with_api_code(catalog::INVALID_FILTER_VALUE)
            .with_info(json!({ "field": field, "value": value }))
    }

    pub fn invalid_data(details: Value) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid Data.")
            .with_api_code(catalog::INVALID_DATA)
            .with_info(details)
    }

    pub fn error_code_not_found(api_code: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Error code doesn't exist.")
            .with_api_code(catalog::ERROR_CODE_NOT_FOUND)
            .with_info(json!({ "api_code": api_code }))
    }
}
