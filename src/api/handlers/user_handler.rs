//! User handlers.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{Requester, UserIdPath, ValidatedJson};
use crate::api::AppState;
use crate::config::{MAX_AGE_LENGTH, MAX_NAME_LENGTH};
use crate::domain::{NewUser, Profile, UserChanges, UserLookup, UserResponse};
use crate::errors::{AppResult, ErrorEnvelope};
use crate::types::{
    Created, FilterSpec, NoContent, Paginated, PaginationParams, CPF_PATTERN,
    USER_FILTERS,
};

static DIGITS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("valid digits regex"));

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Name must have 1 to 80 characters"))]
    #[schema(example = "Ana Souza", max_length = 80)]
    pub name: String,
    /// National ID, 11 digits without punctuation
    #[validate(regex(path = *CPF_PATTERN, message = "CPF must have exactly 11 digits"))]
    #[schema(example = "52998224725")]
    pub cpf: String,
    #[validate(
        regex(path = *DIGITS_PATTERN, message = "Age must contain only digits"),
        length(min = 1, max = MAX_AGE_LENGTH, message = "Age must have at most 3 digits")
    )]
    #[schema(example = "22", max_length = 3)]
    pub age: String,
    /// Defaults to USER. Higher profiles need an `X-Requester-Id` of at least that rank.
    #[schema(example = "USER")]
    pub profile: Option<Profile>,
}

/// Full replacement of a user's editable fields
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Name must have 1 to 80 characters"))]
    #[schema(example = "Ana Souza", max_length = 80)]
    pub name: String,
    #[validate(regex(path = *CPF_PATTERN, message = "CPF must have exactly 11 digits"))]
    #[schema(example = "52998224725")]
    pub cpf: String,
    #[validate(
        regex(path = *DIGITS_PATTERN, message = "Age must contain only digits"),
        length(min = 1, max = MAX_AGE_LENGTH, message = "Age must have at most 3 digits")
    )]
    #[schema(example = "23", max_length = 3)]
    pub age: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        NewUser {
            name: req.name,
            cpf: req.cpf,
            age: req.age,
            profile: req.profile.unwrap_or_default(),
        }
    }
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        UserChanges {
            name: req.name,
            cpf: req.cpf,
            age: req.age,
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/deactivate", post(deactivate_user))
        .route("/:id/activate", post(activate_user))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/user",
    tag = "Users",
    params(
        ("X-Requester-Id" = Option<i32>, Header, description = "Acting user, needed for profiles above USER")
    ),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid data", body = ErrorEnvelope),
        (status = 401, description = "Elevated profile without a requester", body = ErrorEnvelope),
        (status = 403, description = "Requester may not grant this profile", body = ErrorEnvelope),
        (status = 406, description = "CPF checksum is invalid", body = ErrorEnvelope),
        (status = 409, description = "CPF already registered", body = ErrorEnvelope)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    requester: Option<Requester>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    let requester = requester.map(|Requester(id)| id);
    let user = state
        .user_service
        .create_user_as(requester, payload.into())
        .await?;
    Ok(Created(UserResponse::from(user)))
}

/// List users, one page at a time
#[utoipa::path(
    get,
    path = "/api/user",
    tag = "Users",
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page, capped at 100"),
        ("name" = Option<String>, Query, description = "Exact name"),
        ("cpf" = Option<String>, Query, description = "Exact CPF, 11 digits"),
        ("age" = Option<String>, Query, description = "Exact age"),
        ("search" = Option<String>, Query, description = "Reserved, currently ignored")
    ),
    responses(
        (status = 200, description = "One page of users", body = UserPage),
        (status = 400, description = "Invalid filter or page parameters", body = ErrorEnvelope),
        (status = 404, description = "Page past the last one", body = ErrorEnvelope)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    let params = PaginationParams::from_query(&query)?;
    let filter = FilterSpec::from_query(&query, USER_FILTERS)?;

    let page = state.user_service.list_users(&filter, &params).await?;
    Ok(Json(page.map(UserResponse::from)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.find_user_by(UserLookup::Id(id)).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Replace a user's name, CPF and age
#[utoipa::path(
    put,
    path = "/api/user/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid data", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope),
        (status = 406, description = "CPF checksum is invalid", body = ErrorEnvelope),
        (status = 409, description = "CPF held by another user", body = ErrorEnvelope)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.update_user(id, payload.into()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Permanently delete a user
#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> AppResult<NoContent> {
    state.user_service.delete_user(id).await?;
    Ok(NoContent)
}

/// Deactivate a user on behalf of the requester
#[utoipa::path(
    post,
    path = "/api/user/{id}/deactivate",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID"),
        ("X-Requester-Id" = i32, Header, description = "Id of the acting user")
    ),
    responses(
        (status = 204, description = "User deactivated"),
        (status = 401, description = "Requester missing or unknown", body = ErrorEnvelope),
        (status = 403, description = "Requester may not deactivate this user", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    )
)]
pub async fn deactivate_user(
    State(state): State<AppState>,
    Requester(requester): Requester,
    UserIdPath(id): UserIdPath,
) -> AppResult<NoContent> {
    state.user_service.deactivate_user(requester, id).await?;
    Ok(NoContent)
}

/// Reactivate a user on behalf of the requester
#[utoipa::path(
    post,
    path = "/api/user/{id}/activate",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID"),
        ("X-Requester-Id" = i32, Header, description = "Id of the acting user")
    ),
    responses(
        (status = 204, description = "User activated"),
        (status = 401, description = "Requester missing or unknown", body = ErrorEnvelope),
        (status = 403, description = "Requester may not activate this user", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope),
        (status = 409, description = "User is already active", body = ErrorEnvelope)
    )
)]
pub async fn activate_user(
    State(state): State<AppState>,
    Requester(requester): Requester,
    UserIdPath(id): UserIdPath,
) -> AppResult<NoContent> {
    state.user_service.activate_user(requester, id).await?;
    Ok(NoContent)
}
