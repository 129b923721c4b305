//! Route definitions for scholarships.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::scholarships;
use crate::state::AppState;

/// Public routes mounted at `/scholarships`.
///
/// ```text
/// GET /              -> list_scholarships
/// GET /featured      -> featured_scholarships
/// GET /{id}          -> get_scholarship (counts a view)
/// GET /{id}/related  -> related_scholarships
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(scholarships::list_scholarships))
        .route("/featured", get(scholarships::featured_scholarships))
        .route("/{id}", get(scholarships::get_scholarship))
        .route("/{id}/related", get(scholarships::related_scholarships))
}

/// Admin routes mounted at `/admin/scholarships`.
///
/// ```text
/// POST   /      -> create_scholarship
/// PUT    /{id}  -> update_scholarship
/// DELETE /{id}  -> delete_scholarship
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(scholarships::create_scholarship))
        .route(
            "/{id}",
            put(scholarships::update_scholarship).delete(scholarships::delete_scholarship),
        )
}
