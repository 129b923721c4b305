//! Route definitions for the application tracker.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// Routes mounted at `/applications` (auth required).
///
/// ```text
/// GET    /                           -> list_applications
/// POST   /                           -> create_application
/// GET    /{id}                       -> get_application (with tasks and documents)
/// PUT    /{id}                       -> update_application
/// DELETE /{id}                       -> delete_application
/// GET    /{id}/tasks                 -> list_tasks
/// POST   /{id}/tasks                 -> create_task
/// PUT    /{id}/tasks/{task_id}       -> update_task
/// DELETE /{id}/tasks/{task_id}       -> delete_task
/// GET    /{id}/documents             -> list_documents
/// POST   /{id}/documents             -> create_document
/// PUT    /{id}/documents/{doc_id}    -> update_document
/// DELETE /{id}/documents/{doc_id}    -> delete_document
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(applications::list_applications).post(applications::create_application),
        )
        .route(
            "/{id}",
            get(applications::get_application)
                .put(applications::update_application)
                .delete(applications::delete_application),
        )
        .route(
            "/{id}/tasks",
            get(applications::list_tasks).post(applications::create_task),
        )
        .route(
            "/{id}/tasks/{task_id}",
            put(applications::update_task).delete(applications::delete_task),
        )
        .route(
            "/{id}/documents",
            get(applications::list_documents).post(applications::create_document),
        )
        .route(
            "/{id}/documents/{doc_id}",
            put(applications::update_document).delete(applications::delete_document),
        )
}
