//! Session cookie holding the access token for browser clients.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "scholarhub_session";

/// HttpOnly session cookie carrying `token`.
///
/// No `Max-Age` is set: the cookie lives for the browser session and the
/// JWT inside it carries its own expiry.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Cookie template used to remove the session cookie.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}
