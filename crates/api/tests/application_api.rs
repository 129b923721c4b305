//! Application tracker: lifecycle, checklist and per-user scoping.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, create_admin, create_scholarship, create_user, delete_auth,
    get_auth, post_json_auth, put_json_auth, scholarship_body,
};

async fn start_application(app: axum::Router, token: &str, scholarship_id: i64) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/applications",
        json!({ "scholarship_id": scholarship_id, "notes": "Ask for references early" }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_defaults_to_planning(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let (_, user) = create_user(&pool, "user@example.com").await;
    let app = build_test_app(pool).await;
    let scholarship = create_scholarship(app.clone(), &admin, scholarship_body("DAAD")).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/applications",
        json!({ "scholarship_id": scholarship }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "planning");
    assert!(json["data"]["submitted_at"].is_null());

    let response = post_json_auth(
        app,
        "/api/v1/applications",
        json!({ "scholarship_id": scholarship }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_for_missing_scholarship_is_404(pool: PgPool) {
    let (_, user) = create_user(&pool, "user@example.com").await;
    let app = build_test_app(pool).await;

    let response = post_json_auth(
        app,
        "/api/v1/applications",
        json!({ "scholarship_id": 424242 }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_transitions_are_enforced(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let (_, user) = create_user(&pool, "user@example.com").await;
    let app = build_test_app(pool).await;
    let scholarship = create_scholarship(app.clone(), &admin, scholarship_body("DAAD")).await;
    let id = start_application(app.clone(), &user, scholarship).await;
    let uri = format!("/api/v1/applications/{id}");

    // planning -> accepted skips submission.
    let response = put_json_auth(app.clone(), &uri, json!({ "status": "accepted" }), &user).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(app.clone(), &uri, json!({ "status": "submitted" }), &user).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "submitted");
    assert!(json["data"]["submitted_at"].is_string());

    let response = put_json_auth(app.clone(), &uri, json!({ "status": "accepted" }), &user).await;
    assert_eq!(response.status(), StatusCode::OK);

    // accepted is terminal.
    let response = put_json_auth(app, &uri, json!({ "status": "planning" }), &user).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_status(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let (_, user) = create_user(&pool, "user@example.com").await;
    let app = build_test_app(pool).await;
    let first = create_scholarship(app.clone(), &admin, scholarship_body("First")).await;
    let second = create_scholarship(app.clone(), &admin, scholarship_body("Second")).await;
    let id = start_application(app.clone(), &user, first).await;
    start_application(app.clone(), &user, second).await;
    put_json_auth(
        app.clone(),
        &format!("/api/v1/applications/{id}"),
        json!({ "status": "in_progress" }),
        &user,
    )
    .await;

    let json = body_json(get_auth(app.clone(), "/api/v1/applications", &user).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json =
        body_json(get_auth(app.clone(), "/api/v1/applications?status=in_progress", &user).await)
            .await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["scholarship_title"], "First");

    let response = get_auth(app, "/api/v1/applications?status=bogus", &user).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Checklist
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_includes_tasks_and_documents(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let (_, user) = create_user(&pool, "user@example.com").await;
    let app = build_test_app(pool).await;
    let scholarship = create_scholarship(app.clone(), &admin, scholarship_body("DAAD")).await;
    let id = start_application(app.clone(), &user, scholarship).await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/applications/{id}/tasks"),
        json!({ "title": "Request transcript", "due_date": "2027-09-01" }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let task_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/applications/{id}/tasks/{task_id}"),
        json!({ "is_completed": true }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_completed"], true);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/applications/{id}/documents"),
        json!({ "name": "Transcript", "document_type": "transcript" }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["status"], "missing");

    let json = body_json(get_auth(app, &format!("/api/v1/applications/{id}"), &user).await).await;
    let detail = &json["data"];
    assert_eq!(detail["scholarship_title"], "DAAD");
    assert_eq!(detail["task_count"], 1);
    assert_eq!(detail["completed_task_count"], 1);
    assert_eq!(detail["document_count"], 1);
    assert_eq!(detail["tasks"][0]["title"], "Request transcript");
    assert_eq!(detail["documents"][0]["document_type"], "transcript");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_document_type_is_rejected(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let (_, user) = create_user(&pool, "user@example.com").await;
    let app = build_test_app(pool).await;
    let scholarship = create_scholarship(app.clone(), &admin, scholarship_body("DAAD")).await;
    let id = start_application(app.clone(), &user, scholarship).await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/applications/{id}/documents"),
        json!({ "name": "Selfie", "document_type": "photo" }),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_checklist(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let (_, user) = create_user(&pool, "user@example.com").await;
    let app = build_test_app(pool.clone()).await;
    let scholarship = create_scholarship(app.clone(), &admin, scholarship_body("DAAD")).await;
    let id = start_application(app.clone(), &user, scholarship).await;
    post_json_auth(
        app.clone(),
        &format!("/api/v1/applications/{id}/tasks"),
        json!({ "title": "Write essay" }),
        &user,
    )
    .await;

    let response = delete_auth(app.clone(), &format!("/api/v1/applications/{id}"), &user).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM application_tasks WHERE application_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(remaining, 0);

    let response = get_auth(app, &format!("/api/v1/applications/{id}"), &user).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_users_application_is_not_found(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let (_, owner) = create_user(&pool, "owner@example.com").await;
    let (_, intruder) = create_user(&pool, "intruder@example.com").await;
    let app = build_test_app(pool).await;
    let scholarship = create_scholarship(app.clone(), &admin, scholarship_body("DAAD")).await;
    let id = start_application(app.clone(), &owner, scholarship).await;

    let response = get_auth(app.clone(), &format!("/api/v1/applications/{id}"), &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/applications/{id}/tasks"),
        json!({ "title": "Sneaky" }),
        &intruder,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &format!("/api/v1/applications/{id}"), &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(get_auth(app, "/api/v1/applications", &intruder).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}
