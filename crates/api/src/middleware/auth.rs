//! Access-token extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use scholarhub_core::error::CoreError;
use scholarhub_core::types::DbId;

use crate::auth::cookie::SESSION_COOKIE;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in caller.
///
/// The token is read from `Authorization: Bearer <token>` when that header is
/// present, otherwise from the session cookie.
///
/// ```ignore
/// async fn my_favorites(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "listing favorites");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// Role name carried in the token (`"admin"` or `"user"`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match parts.headers.get(AUTHORIZATION) {
            Some(value) => {
                let header = value.to_str().map_err(|_| unauthorized("Invalid Authorization header"))?;
                header
                    .strip_prefix("Bearer ")
                    .map(str::to_string)
                    .ok_or_else(|| {
                        unauthorized("Invalid Authorization format. Expected: Bearer <token>")
                    })?
            }
            None => CookieJar::from_headers(&parts.headers)
                .get(SESSION_COOKIE)
                .map(|c| c.value().to_string())
                .ok_or_else(|| unauthorized("Authentication required"))?,
        };

        let claims = validate_token(&token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}
