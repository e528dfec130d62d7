//! HTTP tests for the full router over an in-memory database.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{test_database, INVALID_CPF, VALID_CPFS};
use user_registry::api::{create_router, AppState};
use user_registry::errors::catalog;
use user_registry::infra::{ErrorRepository, ErrorStore};

// =============================================================================
// Test Helpers
// =============================================================================

struct TestApp {
    router: Router,
    errors: ErrorStore,
}

async fn test_app() -> TestApp {
    let db = test_database().await;
    let errors = ErrorStore::new(db.get_connection());
    let router = create_router(AppState::from_database(db));
    TestApp { router, errors }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn create(&self, name: &str, cpf: &str, profile: &str) -> Value {
        let (status, body) = self.create_as(None, name, cpf, profile).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body
    }

    async fn create_as(
        &self,
        requester: Option<i64>,
        name: &str,
        cpf: &str,
        profile: &str,
    ) -> (StatusCode, Value) {
        let mut request = Request::post("/api/user").header(header::CONTENT_TYPE, "application/json");
        if let Some(id) = requester {
            request = request.header("x-requester-id", id.to_string());
        }
        let body = json!({ "name": name, "cpf": cpf, "age": "30", "profile": profile });
        self.send(request.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn post_as(&self, uri: &str, requester: Option<i64>) -> (StatusCode, Value) {
        let mut request = Request::post(uri);
        if let Some(id) = requester {
            request = request.header("x-requester-id", id.to_string());
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_create_user_returns_created() {
    let app = test_app().await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/user",
            json!({ "name": "Ana Souza", "cpf": VALID_CPFS[0], "age": "22" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Ana Souza");
    assert_eq!(body["cpf"], VALID_CPFS[0]);
    assert_eq!(body["age"], "22");
    assert_eq!(body["activation_status"], true);
    assert_eq!(body["profile"], "USER");
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn test_invalid_cpf_is_enveloped_and_recorded() {
    let app = test_app().await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/user",
            json!({ "name": "Ana", "cpf": INVALID_CPF, "age": "22" }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body["error"]["api_code"], catalog::INVALID_CPF);
    assert_eq!(body["error"]["code"], 406);
    assert_eq!(body["error"]["name"], "Not Acceptable");

    let stored = app.errors.find_by_code(catalog::INVALID_CPF).await.unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn test_duplicate_cpf_conflicts() {
    let app = test_app().await;
    app.create("Ana", VALID_CPFS[0], "USER").await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/user",
            json!({ "name": "Bia", "cpf": VALID_CPFS[0], "age": "31" }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["api_code"], catalog::USER_ALREADY_EXISTS);
    assert_eq!(app.errors.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_unknown_body_field_is_invalid_data() {
    let app = test_app().await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/user",
            json!({ "name": "Ana", "cpf": VALID_CPFS[0], "age": "22", "email": "a@b.c" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["api_code"], catalog::INVALID_DATA);
    assert!(body["error"]["info"].is_object());
}

#[tokio::test]
async fn test_field_validation_reports_each_field() {
    let app = test_app().await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/user",
            json!({ "name": "", "cpf": "123", "age": "1000" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let info = &body["error"]["info"];
    assert!(info["name"].is_array());
    assert!(info["cpf"].is_array());
    assert!(info["age"].is_array());
}

#[tokio::test]
async fn test_get_update_and_delete_user() {
    let app = test_app().await;
    let created = app.create("Ana", VALID_CPFS[0], "USER").await;
    let uri = format!("/api/user/{}", created["id"]);

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cpf"], VALID_CPFS[0]);

    let (status, body) = app
        .json(
            Method::PUT,
            &uri,
            json!({ "name": "Ana Lima", "cpf": VALID_CPFS[1], "age": "23" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ana Lima");
    assert_eq!(body["cpf"], VALID_CPFS[1]);

    let (status, _) = app
        .send(Request::delete(&uri).body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["api_code"], catalog::USER_NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_invalid_data() {
    let app = test_app().await;

    let (status, body) = app.get("/api/user/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["api_code"], catalog::INVALID_DATA);
    assert!(body["error"]["info"]["id"].is_array());
}

#[tokio::test]
async fn test_list_users_paginates_and_filters() {
    let app = test_app().await;
    for (i, cpf) in VALID_CPFS.iter().enumerate() {
        app.create(&format!("User {}", i), cpf, "USER").await;
    }

    let (status, body) = app.get("/api/user?page=2&per_page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["meta"]["total_pages"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["name"], "User 2");

    let (status, body) = app
        .get(&format!("/api/user?cpf={}&unknown=1", VALID_CPFS[3]))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["cpf"], VALID_CPFS[3]);
}

#[tokio::test]
async fn test_list_users_rejects_bad_parameters() {
    let app = test_app().await;
    app.create("Ana", VALID_CPFS[0], "USER").await;

    let (status, body) = app.get("/api/user?page=3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["api_code"], catalog::PAGES_NOT_FOUND);
    assert_eq!(body["error"]["info"]["total_pages"], 1);

    let (status, body) = app.get("/api/user?cpf=12ab").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["api_code"], catalog::INVALID_FILTER_VALUE);

    let (status, body) = app.get("/api/user?per_page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["api_code"], catalog::INVALID_DATA);
}

#[tokio::test]
async fn test_empty_listing_is_ok() {
    let app = test_app().await;

    let (status, body) = app.get("/api/user").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["total_pages"], 0);
}

#[tokio::test]
async fn test_collection_routes_accept_trailing_slash() {
    let app = test_app().await;

    let (status, _) = app
        .json(
            Method::POST,
            "/api/user/",
            json!({ "name": "Ana", "cpf": VALID_CPFS[0], "age": "22" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get("/api/user/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);

    let (status, body) = app.get("/api/error/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 0);
}

#[tokio::test]
async fn test_unknown_route_is_enveloped() {
    let app = test_app().await;

    let (status, body) = app.get("/api/nothing/here").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["api_code"], catalog::PAGE_NOT_FOUND);
    assert_eq!(body["error"]["description"], "Page doesn't exist.");
}

// =============================================================================
// Profiles
// =============================================================================

#[tokio::test]
async fn test_elevated_profile_needs_requester_once_registry_has_users() {
    let app = test_app().await;
    let owner = app.create("Owner", VALID_CPFS[0], "OWNER").await;

    let (status, body) = app
        .create_as(None, "Mallory", VALID_CPFS[1], "OWNER")
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["api_code"], catalog::REQUESTER_NOT_IDENTIFIED);

    let (status, body) = app
        .create_as(owner["id"].as_i64(), "Admin", VALID_CPFS[1], "ADMIN")
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["profile"], "ADMIN");
}

#[tokio::test]
async fn test_user_cannot_grant_admin() {
    let app = test_app().await;
    let user = app.create("Ana", VALID_CPFS[0], "USER").await;

    let (status, body) = app
        .create_as(user["id"].as_i64(), "Admin", VALID_CPFS[1], "ADMIN")
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["api_code"], catalog::PROFILE_FORBIDDEN_ACCESS);

    let (_, body) = app.get("/api/user").await;
    assert_eq!(body["meta"]["total"], 1);
}

// =============================================================================
// Activation
// =============================================================================

#[tokio::test]
async fn test_deactivate_requires_requester() {
    let app = test_app().await;
    let target = app.create("Ana", VALID_CPFS[0], "USER").await;
    let uri = format!("/api/user/{}/deactivate", target["id"]);

    let (status, body) = app.post_as(&uri, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["api_code"], catalog::REQUESTER_NOT_IDENTIFIED);
}

#[tokio::test]
async fn test_owner_deactivates_and_activates() {
    let app = test_app().await;
    let owner = app.create("Owner", VALID_CPFS[0], "OWNER").await;
    let target = app.create("Ana", VALID_CPFS[1], "USER").await;
    let owner_id = owner["id"].as_i64();
    let target_id = &target["id"];

    let (status, _) = app
        .post_as(&format!("/api/user/{}/deactivate", target_id), owner_id)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app.get(&format!("/api/user/{}", target_id)).await;
    assert_eq!(body["activation_status"], false);

    let (status, _) = app
        .post_as(&format!("/api/user/{}/activate", target_id), owner_id)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .post_as(&format!("/api/user/{}/activate", target_id), owner_id)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["api_code"], catalog::USER_IS_ACTIVE);
}

#[tokio::test]
async fn test_user_cannot_deactivate_admin() {
    let app = test_app().await;
    let admin = app.create("Admin", VALID_CPFS[1], "ADMIN").await;
    let user = app.create("Ana", VALID_CPFS[0], "USER").await;

    let (status, body) = app
        .post_as(
            &format!("/api/user/{}/deactivate", admin["id"]),
            user["id"].as_i64(),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["api_code"], catalog::DEACTIVATE_FORBIDDEN);
}

// =============================================================================
// Error catalog
// =============================================================================

#[tokio::test]
async fn test_recorded_error_is_listed_and_fetched() {
    let app = test_app().await;
    app.get("/api/user/999").await;

    let (status, body) = app
        .get(&format!("/api/error/{}", catalog::USER_NOT_FOUND))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 404);
    assert_eq!(body["description"], "User doesn't exist.");

    let (status, body) = app.get("/api/error?code=404").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["api_code"], catalog::USER_NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_error_code_is_not_found() {
    let app = test_app().await;

    let (status, body) = app.get("/api/error/NOPE").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["api_code"], catalog::ERROR_CODE_NOT_FOUND);
    assert_eq!(body["error"]["info"]["api_code"], "NOPE");
}

// =============================================================================
// Health & docs
// =============================================================================

#[tokio::test]
async fn test_health_reports_database() {
    let app = test_app().await;

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app = test_app().await;

    let (status, body) = app.get("/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/user"].is_object());
    assert!(body["paths"]["/api/error/{api_code}"].is_object());
}
