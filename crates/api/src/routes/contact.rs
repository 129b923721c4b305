use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Public route mounted at `/contact`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(contact::submit_contact))
}

/// Admin routes mounted at `/admin/contact-messages`.
///
/// ```text
/// GET    /      -> list_messages
/// PUT    /{id}  -> update_message_status
/// DELETE /{id}  -> delete_message
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list_messages))
        .route(
            "/{id}",
            put(contact::update_message_status).delete(contact::delete_message),
        )
}
