use axum::routing::{get, post};
use axum::Router;

use crate::handlers::essays;
use crate::state::AppState;

/// Routes mounted at `/essays` (auth required).
///
/// ```text
/// POST   /generate  -> generate_essay (draft only, not stored)
/// GET    /          -> list_essays
/// POST   /          -> create_essay
/// GET    /{id}      -> get_essay
/// PUT    /{id}      -> update_essay
/// DELETE /{id}      -> delete_essay
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(essays::generate_essay))
        .route("/", get(essays::list_essays).post(essays::create_essay))
        .route(
            "/{id}",
            get(essays::get_essay)
                .put(essays::update_essay)
                .delete(essays::delete_essay),
        )
}
