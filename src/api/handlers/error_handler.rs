//! Error catalog handlers.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::AppState;
use crate::domain::ErrorRecord;
use crate::errors::{AppResult, ErrorEnvelope};
use crate::types::{FilterSpec, Paginated, PaginationParams, ERROR_FILTERS};

/// Create error catalog routes
pub fn error_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_errors))
        .route("/:api_code", get(get_error))
}

/// List persisted error records
#[utoipa::path(
    get,
    path = "/api/error",
    tag = "Errors",
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page, capped at 100"),
        ("api_code" = Option<String>, Query, description = "Exact API code"),
        ("code" = Option<u16>, Query, description = "HTTP status"),
        ("name" = Option<String>, Query, description = "Exact name")
    ),
    responses(
        (status = 200, description = "One page of error records", body = ErrorPage),
        (status = 400, description = "Invalid filter or page parameters", body = ErrorEnvelope),
        (status = 404, description = "Page past the last one", body = ErrorEnvelope)
    )
)]
pub async fn list_errors(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> AppResult<Json<Paginated<ErrorRecord>>> {
    let params = PaginationParams::from_query(&query)?;
    let filter = FilterSpec::from_query(&query, ERROR_FILTERS)?;

    let page = state.error_service.list_errors(&filter, &params).await?;
    Ok(Json(page))
}

/// Get the record of one API error code
#[utoipa::path(
    get,
    path = "/api/error/{api_code}",
    tag = "Errors",
    params(("api_code" = String, Path, description = "API error code")),
    responses(
        (status = 200, description = "Error record", body = ErrorRecord),
        (status = 404, description = "Unknown code", body = ErrorEnvelope)
    )
)]
pub async fn get_error(
    State(state): State<AppState>,
    Path(api_code): Path<String>,
) -> AppResult<Json<ErrorRecord>> {
    let record = state.error_service.get_error(&api_code).await?;
    Ok(Json(record))
}
