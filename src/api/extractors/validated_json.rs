//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use validator::{Validate, ValidationErrors};

use crate::errors::{ApiError, AppError};

/// Validated JSON extractor that automatically validates requests.
///
/// Malformed bodies, unknown fields and failed validation rules are all
/// rejected with `INVALID_DATA`, with details under the error's `info`.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use user_registry::api::extractors::ValidatedJson;
///
/// #[derive(Deserialize, Validate)]
/// #[serde(deny_unknown_fields)]
/// struct RenameRequest {
///     #[validate(length(min = 1, max = 80))]
///     name: String,
/// }
///
/// async fn rename(ValidatedJson(payload): ValidatedJson<RenameRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_data(json!({ "body": [e.body_text()] })))?;

        value
            .validate()
            .map_err(|e| ApiError::invalid_data(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Map each failing field to its error messages
fn format_validation_errors(errors: &ValidationErrors) -> Value {
    let fields: Map<String, Value> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
                .map(Value::String)
                .collect();
            (field.to_string(), Value::Array(messages))
        })
        .collect();

    Value::Object(fields)
}
