use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde_json::json;

use crate::domain::UserId;
use crate::errors::{ApiError, AppError};

/// User id from the `{id}` path segment, rejected with `INVALID_DATA` when not an integer.
#[derive(Debug, Clone, Copy)]
pub struct UserIdPath(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_data(json!({ "id": [e.body_text()] })))?;

        Ok(UserIdPath(UserId::new(id)))
    }
}
