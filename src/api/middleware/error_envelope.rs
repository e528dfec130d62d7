//! Error envelope middleware.
//!
//! Handlers and extractors fail with [`AppError`](crate::errors::AppError),
//! whose response carries the originating [`ApiError`] as an extension. This
//! layer upserts that error's record and re-renders the envelope from the
//! stored record, so each occurrence has exactly one persistence side effect.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::AppState;
use crate::errors::{ApiError, ErrorEnvelope};

pub async fn error_envelope(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(error) = response.extensions_mut().remove::<ApiError>() else {
        return response;
    };

    let record = state.error_service.record(&error).await;
    tracing::debug!(
        api_code = %record.api_code,
        status = record.code,
        "API error recorded"
    );

    (response.status(), Json(ErrorEnvelope { error: record })).into_response()
}
