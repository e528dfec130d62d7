//! OpenAPI documentation configuration.
//!
//! The document is served as JSON at `/api-docs/openapi.json`.

use axum::response::Json;
use utoipa::OpenApi;

use crate::api::handlers::{error_handler, health_handler, user_handler};
use crate::domain::{ErrorRecord, Profile, UserResponse};
use crate::errors::ErrorEnvelope;
use crate::types::{ErrorPage, PaginationMeta, UserPage};

/// OpenAPI documentation for the user registry
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Registry",
        version = "0.1.0",
        description = "User records with CPF validation, paginated listings and a persisted API error catalog"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // User endpoints
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::deactivate_user,
        user_handler::activate_user,
        // Error catalog endpoints
        error_handler::list_errors,
        error_handler::get_error,
        // Health
        health_handler::health,
    ),
    components(
        schemas(
            // Domain types
            Profile,
            UserResponse,
            ErrorRecord,
            ErrorEnvelope,
            // Pagination
            PaginationMeta,
            UserPage,
            ErrorPage,
            // Request bodies
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            // Health
            health_handler::HealthResponse,
            health_handler::ServiceStatus,
        )
    ),
    tags(
        (name = "Users", description = "User management operations"),
        (name = "Errors", description = "Persisted API error records"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Serve the generated document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
