//! Handlers for the `/auth` resource (register, login, refresh, logout, me).
//!
//! Login, register and refresh return the tokens in the body and also set the
//! `scholarhub_session` cookie so browser clients never touch the token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use scholarhub_core::error::CoreError;
use scholarhub_core::roles::ROLE_USER;
use scholarhub_core::types::DbId;
use scholarhub_core::validation::{normalize_email, validate_email, validate_required};
use scholarhub_db::models::session::CreateSession;
use scholarhub_db::models::user::{CreateUser, UserResponse};
use scholarhub_db::repositories::{RoleRepo, SessionRepo, UserRepo};

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum length of a display name.
pub const MAX_NAME_LENGTH: usize = 120;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Tokens plus the signed-in user, returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

type AuthReply = (CookieJar, Json<DataResponse<AuthResponse>>);

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a `user` account and sign it in. Duplicate emails yield 409.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<DataResponse<AuthResponse>>)> {
    validate_required("Name", &input.name, MAX_NAME_LENGTH)?;
    validate_email(&input.email)?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = RoleRepo::find_by_name(&state.pool, ROLE_USER)
        .await?
        .ok_or_else(|| AppError::InternalError("Default 'user' role is missing".into()))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email: normalize_email(&input.email),
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    let (jar, body) = sign_in(&state, jar, user.id).await?;
    Ok((StatusCode::CREATED, jar, body))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<AuthReply> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &normalize_email(&input.email))
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Failed login attempt");
        return Err(invalid());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    UserRepo::record_login(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");

    sign_in(&state, jar, user.id).await
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new token pair. The old token is revoked.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<RefreshRequest>,
) -> AppResult<AuthReply> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    };

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid)?;

    // Only the request that wins the revoke may mint a new pair.
    if !SessionRepo::revoke(&state.pool, session.id).await? {
        tracing::info!(session_id = session.id, "Refresh token already rotated");
        return Err(invalid());
    }

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    sign_in(&state, jar, user.id).await
}

/// POST /api/v1/auth/logout
///
/// Revoke every session of the caller and clear the cookie. 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    jar: CookieJar,
) -> AppResult<(StatusCode, CookieJar)> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok((StatusCode::NO_CONTENT, jar.remove(clear_session_cookie())))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_response(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", auth_user.user_id)))?;
    Ok(Json(DataResponse { data: user }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a token pair for `user_id`, persist the refresh session and set the cookie.
async fn sign_in(state: &AppState, jar: CookieJar, user_id: DbId) -> AppResult<AuthReply> {
    let user = UserRepo::find_response(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", user_id)))?;

    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_token, refresh_token_hash) = generate_refresh_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash,
            expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
        },
    )
    .await?;

    let jar = jar.add(session_cookie(
        access_token.clone(),
        state.config.session_cookie_secure,
    ));

    let body = AuthResponse {
        access_token,
        refresh_token,
        expires_in: jwt.access_token_expiry_secs(),
        user,
    };
    Ok((jar, Json(DataResponse { data: body })))
}
