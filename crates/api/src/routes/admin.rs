//! Route definitions for `/admin` user management and analytics.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{admin, analytics};
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the `admin` role.
///
/// ```text
/// GET /users            -> list_users
/// PUT /users/{id}/role  -> change_role
/// GET /analytics        -> dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}/role", put(admin::change_role))
        .route("/analytics", get(analytics::dashboard))
}
