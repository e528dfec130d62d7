//! Application route configuration.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{error_handler, error_routes, health, user_handler, user_routes};
use super::middleware::error_envelope;
use super::openapi::openapi_json;
use super::AppState;
use crate::config::API_PREFIX;
use crate::errors::{catalog, ApiError, AppError};

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/user", user_routes())
        .nest("/error", error_routes())
        // Collection routes also answer with a trailing slash
        .route(
            "/user/",
            post(user_handler::create_user).get(user_handler::list_users),
        )
        .route("/error/", get(error_handler::list_errors));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest(API_PREFIX, api)
        .fallback(route_not_found)
        // Every failure leaving a handler or extractor passes through here
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error_envelope,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unknown paths get the same envelope as any other failure
async fn route_not_found() -> AppError {
    ApiError::catalogued(catalog::PAGE_NOT_FOUND).map_or_else(AppError::from, AppError::from)
}
