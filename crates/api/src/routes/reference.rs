use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::reference;
use crate::state::AppState;

/// Public routes mounted at `/reference`.
///
/// ```text
/// GET /{kind}  -> list_reference (countries | fields | levels | sources)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{kind}", get(reference::list_reference))
}

/// Admin routes mounted at `/admin/reference`.
///
/// ```text
/// POST   /{kind}       -> create_reference
/// DELETE /{kind}/{id}  -> delete_reference
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/{kind}", post(reference::create_reference))
        .route("/{kind}/{id}", delete(reference::delete_reference))
}
