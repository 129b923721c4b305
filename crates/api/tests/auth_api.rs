//! Registration, login, refresh, logout and cookie sessions.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    body_json, build_test_app, create_user, get, get_auth, post_auth, post_json, TEST_PASSWORD,
};
use scholarhub_db::repositories::UserRepo;

fn set_cookie(response: &axum::http::Response<Body>) -> String {
    response
        .headers()
        .get("set-cookie")
        .expect("set-cookie header")
        .to_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_user_and_sets_cookie(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({ "name": " Ada ", "email": "Ada@Example.com", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("scholarhub_session="));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    let data = &json["data"];
    assert!(data["access_token"].is_string());
    assert!(data["refresh_token"].is_string());
    assert_eq!(data["expires_in"], 3600);
    assert_eq!(data["user"]["name"], "Ada");
    assert_eq!(data["user"]["email"], "ada@example.com");
    assert_eq!(data["user"]["role"], "user");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_email_is_conflict(pool: PgPool) {
    create_user(&pool, "taken@example.com").await;
    let app = build_test_app(pool).await;

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({ "name": "Other", "email": "TAKEN@example.com", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({ "name": "Ada", "email": "ada@example.com", "password": "short" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_valid_credentials(pool: PgPool) {
    create_user(&pool, "grace@example.com").await;
    let app = build_test_app(pool).await;

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "grace@example.com", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["email"], "grace@example.com");
    assert!(json["data"]["user"]["last_login_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_wrong_password_is_unauthorized(pool: PgPool) {
    create_user(&pool, "grace@example.com").await;
    let app = build_test_app(pool).await;

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "grace@example.com", "password": "not-the-password" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_unknown_email_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_deactivated_account_is_forbidden(pool: PgPool) {
    let (user_id, _) = create_user(&pool, "gone@example.com").await;
    UserRepo::deactivate(&pool, user_id).await.unwrap();
    let app = build_test_app(pool).await;

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "gone@example.com", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Refresh and logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_token(pool: PgPool) {
    create_user(&pool, "grace@example.com").await;
    let app = build_test_app(pool).await;

    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "grace@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    let refresh_token = body_json(login).await["data"]["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    let first = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let rotated = body_json(first).await["data"]["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(rotated, refresh_token);

    // The old token was revoked by the rotation.
    let reused = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(reused.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_refreshes_rotate_only_once(pool: PgPool) {
    create_user(&pool, "grace@example.com").await;
    let app = build_test_app(pool).await;

    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "grace@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    let refresh_token = body_json(login).await["data"]["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    let body = json!({ "refresh_token": refresh_token });
    let (first, second) = tokio::join!(
        post_json(app.clone(), "/api/v1/auth/refresh", body.clone()),
        post_json(app, "/api/v1/auth/refresh", body),
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::UNAUTHORIZED]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_clears_cookie_and_revokes_refresh(pool: PgPool) {
    create_user(&pool, "grace@example.com").await;
    let app = build_test_app(pool).await;

    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "grace@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    let json = body_json(login).await;
    let access = json["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = json["data"]["refresh_token"].as_str().unwrap().to_string();

    // Browser flow: the session cookie authenticates the logout and is cleared.
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/logout")
        .header("cookie", format!("scholarhub_session={access}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("scholarhub_session="));
    assert!(cookie.contains("Max-Age=0"));

    let response = post_json(app, "/api/v1/auth/refresh", json!({ "refresh_token": refresh })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Authenticated identity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn bearer_logout_revokes_sessions(pool: PgPool) {
    let (_, token) = create_user(&pool, "grace@example.com").await;
    let app = build_test_app(pool).await;
    let response = post_auth(app, "/api/v1/auth/logout", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_accepts_bearer_token(pool: PgPool) {
    let (user_id, token) = create_user(&pool, "grace@example.com").await;
    let app = build_test_app(pool).await;

    let response = get_auth(app, "/api/v1/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user_id);
    assert_eq!(json["data"]["role"], "user");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_accepts_session_cookie(pool: PgPool) {
    let (_, token) = create_user(&pool, "grace@example.com").await;
    let app = build_test_app(pool).await;

    let request = Request::builder()
        .uri("/api/v1/auth/me")
        .header("cookie", format!("scholarhub_session={token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["email"], "grace@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_without_credentials_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_with_garbage_token_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get_auth(app, "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
