//! Identity of the user performing a request.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::config::REQUESTER_ID_HEADER;
use crate::domain::UserId;
use crate::errors::{ApiError, AppError};

/// Id taken from the `X-Requester-Id` header.
///
/// The upstream gateway authenticates callers and sets this header; a missing
/// or non-numeric value is rejected with `REQUESTER_NOT_IDENTIFIED`.
#[derive(Debug, Clone, Copy)]
pub struct Requester(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(REQUESTER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<UserId>().ok())
            .map(Requester)
            .ok_or_else(|| ApiError::requester_not_identified().into())
    }
}
