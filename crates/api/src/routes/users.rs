use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /me  -> get_profile
/// PUT /me  -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(users::get_profile).put(users::update_profile))
}
