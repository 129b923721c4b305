use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::universities;
use crate::state::AppState;

/// Public routes mounted at `/universities`.
///
/// ```text
/// GET /      -> list_universities
/// GET /{id}  -> get_university
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(universities::list_universities))
        .route("/{id}", get(universities::get_university))
}

/// Admin routes mounted at `/admin/universities`.
///
/// ```text
/// POST   /      -> create_university
/// PUT    /{id}  -> update_university
/// DELETE /{id}  -> delete_university
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(universities::create_university))
        .route(
            "/{id}",
            put(universities::update_university).delete(universities::delete_university),
        )
}
