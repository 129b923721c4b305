pub mod admin;
pub mod applications;
pub mod auth;
pub mod contact;
pub mod essays;
pub mod favorites;
pub mod health;
pub mod reference;
pub mod scholarships;
pub mod universities;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register, /auth/login, /auth/refresh      public
/// /auth/logout, /auth/me                          auth
///
/// /scholarships                                   search (public)
/// /scholarships/featured                          featured (public)
/// /scholarships/{id}                              detail, counts a view (public)
/// /scholarships/{id}/related                      related (public)
/// /universities, /universities/{id}               public
/// /reference/{kind}                               public
/// /contact                                        contact form (public)
///
/// /users/me                                       profile (auth)
/// /favorites, /favorites/{scholarship_id}         bookmarks (auth)
/// /applications/...                               tracker + checklist (auth)
/// /essays/generate, /essays/...                   drafts + saved essays (auth)
///
/// /admin/scholarships/...                         admin
/// /admin/universities/...                         admin
/// /admin/reference/{kind}/...                     admin
/// /admin/contact-messages/...                     admin
/// /admin/users, /admin/users/{id}/role            admin
/// /admin/analytics                                admin
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/scholarships", scholarships::router())
        .nest("/universities", universities::router())
        .nest("/reference", reference::router())
        .nest("/contact", contact::router())
        .nest("/favorites", favorites::router())
        .nest("/applications", applications::router())
        .nest("/essays", essays::router())
        .nest("/admin", admin::router())
        .nest("/admin/scholarships", scholarships::admin_router())
        .nest("/admin/universities", universities::admin_router())
        .nest("/admin/reference", reference::admin_router())
        .nest("/admin/contact-messages", contact::admin_router())
}
