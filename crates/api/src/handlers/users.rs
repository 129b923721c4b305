//! Handlers for the signed-in user's own profile (`/users/me`).

use axum::extract::State;
use axum::Json;
use scholarhub_core::error::CoreError;
use scholarhub_core::validation::{validate_optional, validate_required};
use scholarhub_db::models::user::{UpdateProfile, UserResponse};
use scholarhub_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::MAX_NAME_LENGTH;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_BIO_LENGTH: usize = 2_000;
const MAX_PROFILE_FIELD_LENGTH: usize = 120;

/// GET /api/v1/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_response(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", auth_user.user_id)))?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/users/me
///
/// Patch name, bio, country, field of study and academic level. Omitted
/// fields keep their value.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(name) = &input.name {
        validate_required("Name", name, MAX_NAME_LENGTH)?;
    }
    validate_optional("Bio", input.bio.as_deref(), MAX_BIO_LENGTH)?;
    validate_optional("Country", input.country.as_deref(), MAX_PROFILE_FIELD_LENGTH)?;
    validate_optional(
        "Field of study",
        input.field_of_study.as_deref(),
        MAX_PROFILE_FIELD_LENGTH,
    )?;
    validate_optional(
        "Academic level",
        input.academic_level.as_deref(),
        MAX_PROFILE_FIELD_LENGTH,
    )?;

    let input = UpdateProfile {
        name: input.name.map(|n| n.trim().to_string()),
        ..input
    };

    UserRepo::update_profile(&state.pool, auth_user.user_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", auth_user.user_id)))?;

    let user = UserRepo::find_response(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", auth_user.user_id)))?;

    tracing::info!(user_id = auth_user.user_id, "Profile updated");
    Ok(Json(DataResponse { data: user }))
}
