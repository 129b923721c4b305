use axum::routing::get;
use axum::Router;

use crate::handlers::favorites;
use crate::state::AppState;

/// Routes mounted at `/favorites` (auth required).
///
/// ```text
/// GET    /                  -> list_favorites
/// GET    /{scholarship_id}  -> get_favorite_status
/// POST   /{scholarship_id}  -> add_favorite
/// DELETE /{scholarship_id}  -> remove_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::list_favorites))
        .route(
            "/{scholarship_id}",
            get(favorites::get_favorite_status)
                .post(favorites::add_favorite)
                .delete(favorites::remove_favorite),
        )
}
