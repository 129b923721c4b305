#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use scholarhub_api::auth::jwt::{generate_access_token, JwtConfig};
use scholarhub_api::auth::password::hash_password;
use scholarhub_api::config::ServerConfig;
use scholarhub_api::llm::{EssayGenerator, GeneratedEssay, LlmConfig, LlmError};
use scholarhub_api::router::build_app_router;
use scholarhub_api::state::{load_scholarship_columns, AppState};
use scholarhub_core::essay::{count_words, EssayRequest};
use scholarhub_core::roles::{ROLE_ADMIN, ROLE_USER};
use scholarhub_core::types::DbId;
use scholarhub_db::models::user::CreateUser;
use scholarhub_db::repositories::{RoleRepo, UserRepo};

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// `ServerConfig` for tests: dev CORS origin, fixed JWT secret, LLM disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_cookie_secure: false,
        jwt: JwtConfig {
            secret: "scholarhub-integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 7,
        },
        llm: LlmConfig::disabled(),
    }
}

/// Deterministic in-process essay generator.
pub struct StubEssayGenerator;

#[async_trait]
impl EssayGenerator for StubEssayGenerator {
    async fn generate(&self, request: &EssayRequest) -> Result<GeneratedEssay, LlmError> {
        let content = format!(
            "Draft {} essay in a {} tone answering: {}",
            request.essay_type,
            request.tone(),
            request.prompt.trim()
        );
        Ok(GeneratedEssay {
            word_count: count_words(&content),
            content,
            model: "stub-model".to_string(),
        })
    }
}

/// Router over `pool` with the stub essay generator.
pub async fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_generator(pool, Arc::new(StubEssayGenerator)).await
}

/// Router over `pool` with the given essay generator.
///
/// Uses [`build_app_router`], the same builder as `main.rs`, so tests run
/// behind the production middleware stack.
pub async fn build_test_app_with_generator(
    pool: PgPool,
    essay_generator: Arc<dyn EssayGenerator>,
) -> Router {
    let config = test_config();
    let columns = load_scholarship_columns(&pool).await;
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        columns: Arc::new(columns),
        essay_generator,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] and the given role; returns `(id, access_token)`.
pub async fn create_user_with_role(pool: &PgPool, email: &str, role: &str) -> (DbId, String) {
    let role_row = RoleRepo::find_by_name(pool, role)
        .await
        .unwrap()
        .expect("role should be seeded");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: email.split('@').next().unwrap_or("user").to_string(),
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role_id: role_row.id,
        },
    )
    .await
    .unwrap();

    let token = generate_access_token(user.id, role, &test_config().jwt).unwrap();
    (user.id, token)
}

pub async fn create_user(pool: &PgPool, email: &str) -> (DbId, String) {
    create_user_with_role(pool, email, ROLE_USER).await
}

pub async fn create_admin(pool: &PgPool, email: &str) -> (DbId, String) {
    create_user_with_role(pool, email, ROLE_ADMIN).await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a scholarship through the admin API and return its id.
pub async fn create_scholarship(app: Router, admin_token: &str, body: serde_json::Value) -> DbId {
    let response = post_json_auth(app, "/api/v1/admin/scholarships", body, admin_token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Minimal valid scholarship body.
pub fn scholarship_body(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "country": "Germany",
        "level": "Master",
        "field": "Engineering",
        "amount": "EUR 992 per month",
        "amount_value": 11904.0,
        "currency": "eur",
        "deadline": "2027-10-31",
        "description": "Monthly stipend for postgraduate study.",
        "eligibility": ["Bachelor's degree", "  "],
        "benefits": ["Stipend"],
        "application_process": ["Apply online"],
    })
}
