//! Scholarship catalogue: fallback, search, detail, admin writes.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, create_admin, create_scholarship, create_user, delete_auth, get,
    get_auth, post_json, post_json_auth, put_json_auth, scholarship_body,
};

// ---------------------------------------------------------------------------
// Listing and fallback
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_table_serves_fallback_catalogue(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get(app, "/api/v1/scholarships").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let page = &json["data"];
    assert_eq!(page["source"], "fallback");
    assert!(page["total"].as_i64().unwrap() > 0);
    let items = page["items"].as_array().unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|s| s["id"].as_i64().unwrap() < 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filtered_listing_on_empty_table_returns_no_rows(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get(app, "/api/v1/scholarships?country=Germany").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["source"], "database");
    assert_eq!(json["data"]["total"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unreachable_database_serves_filtered_fallback(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    pool.close().await;

    let response = get(app.clone(), "/api/v1/scholarships?country=germany").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let page = &json["data"];
    assert_eq!(page["source"], "fallback");
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["country"], "Germany");
    assert!(page["items"][0]["id"].as_i64().unwrap() < 0);

    let response = get(app, "/api/v1/scholarships/featured").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|s| s["is_featured"] == true));
    assert!(items.iter().all(|s| s["id"].as_i64().unwrap() < 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filters_return_only_matches(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let app = build_test_app(pool).await;

    create_scholarship(app.clone(), &admin, scholarship_body("DAAD Study Scholarship")).await;
    let mut other = scholarship_body("Chevening Scholarship");
    other["country"] = json!("United Kingdom");
    other["field"] = json!("Public Policy");
    create_scholarship(app.clone(), &admin, other).await;

    let response = get(app.clone(), "/api/v1/scholarships?country=germany").await;
    let json = body_json(response).await;
    let page = &json["data"];
    assert_eq!(page["source"], "database");
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["title"], "DAAD Study Scholarship");

    let response = get(app.clone(), "/api/v1/scholarships?q=chevening").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["country"], "United Kingdom");

    let response = get(app, "/api/v1/scholarships?limit=1&offset=1").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["limit"], 1);
    assert_eq!(json["data"]["offset"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_amount_range_is_rejected(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get(app, "/api/v1/scholarships?min_amount=5000&max_amount=100").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn featured_lists_only_featured(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let app = build_test_app(pool).await;

    let mut featured = scholarship_body("Featured One");
    featured["is_featured"] = json!(true);
    create_scholarship(app.clone(), &admin, featured).await;
    create_scholarship(app.clone(), &admin, scholarship_body("Plain One")).await;

    let response = get(app, "/api/v1/scholarships/featured").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Featured One");
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_counts_views(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let app = build_test_app(pool).await;
    let id = create_scholarship(app.clone(), &admin, scholarship_body("DAAD")).await;

    let first = body_json(get(app.clone(), &format!("/api/v1/scholarships/{id}")).await).await;
    let second = body_json(get(app, &format!("/api/v1/scholarships/{id}")).await).await;

    assert_eq!(first["data"]["view_count"], 1);
    assert_eq!(second["data"]["view_count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn fallback_detail_by_negative_id(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get(app, "/api/v1/scholarships/-1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], -1);
    assert_eq!(json["data"]["view_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_scholarship_is_404(pool: PgPool) {
    let app = build_test_app(pool).await;

    let response = get(app.clone(), "/api/v1/scholarships/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = get(app, "/api/v1/scholarships/-9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn related_prefers_same_field(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let app = build_test_app(pool).await;

    let base = create_scholarship(app.clone(), &admin, scholarship_body("Base")).await;
    create_scholarship(app.clone(), &admin, scholarship_body("Same Field")).await;
    let mut unrelated = scholarship_body("Unrelated");
    unrelated["country"] = json!("Japan");
    unrelated["field"] = json!("Music");
    create_scholarship(app.clone(), &admin, unrelated).await;

    let response = get(app, &format!("/api/v1/scholarships/{base}/related")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Same Field"]);
}

// ---------------------------------------------------------------------------
// Admin writes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_create_normalizes_and_persists(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let app = build_test_app(pool).await;

    let mut body = scholarship_body("  DAAD Study Scholarship  ");
    body["is_featured"] = json!(true);
    let response =
        post_json_auth(app.clone(), "/api/v1/admin/scholarships", body, &admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let json = body_json(get(app, &format!("/api/v1/scholarships/{id}")).await).await;
    let s = &json["data"];
    assert_eq!(s["title"], "DAAD Study Scholarship");
    assert_eq!(s["currency"], "EUR");
    assert_eq!(s["amount"], "EUR 992 per month");
    assert_eq!(s["amount_value"], 11904.0);
    assert_eq!(s["deadline"], "2027-10-31");
    assert_eq!(s["eligibility"], json!(["Bachelor's degree"]));
    assert_eq!(s["is_featured"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_create_requires_title(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let app = build_test_app(pool).await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/scholarships",
        scholarship_body("   "),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_update_and_delete(pool: PgPool) {
    let (_, admin) = create_admin(&pool, "admin@example.com").await;
    let app = build_test_app(pool).await;
    let id = create_scholarship(app.clone(), &admin, scholarship_body("DAAD")).await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/scholarships/{id}"),
        json!({ "title": "DAAD Renamed", "benefits": ["Stipend", "Travel"] }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "DAAD Renamed");
    assert_eq!(json["data"]["benefits"], json!(["Stipend", "Travel"]));
    assert_eq!(json["data"]["country"], "Germany");

    let response =
        delete_auth(app.clone(), &format!("/api/v1/admin/scholarships/{id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &format!("/api/v1/admin/scholarships/{id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_reject_regular_users(pool: PgPool) {
    let (_, user) = create_user(&pool, "user@example.com").await;
    let app = build_test_app(pool).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/scholarships",
        scholarship_body("Nope"),
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/v1/admin/users", &user).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_reject_anonymous(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = post_json(app, "/api/v1/admin/scholarships", scholarship_body("Nope")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
