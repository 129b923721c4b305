//! Handlers for the signed-in user's bookmarked scholarships (`/favorites`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use scholarhub_core::error::CoreError;
use scholarhub_core::types::DbId;
use scholarhub_db::models::favorite::{Favorite, FavoriteWithScholarship};
use scholarhub_db::repositories::{FavoriteRepo, ScholarshipRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FavoriteStatus {
    pub scholarship_id: DbId,
    pub is_favorite: bool,
}

/// GET /api/v1/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<FavoriteWithScholarship>>>> {
    let items =
        FavoriteRepo::list_for_user(&state.pool, &state.columns, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/favorites/{scholarship_id}
pub async fn get_favorite_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(scholarship_id): Path<DbId>,
) -> AppResult<Json<DataResponse<FavoriteStatus>>> {
    let is_favorite =
        FavoriteRepo::is_favorite(&state.pool, auth_user.user_id, scholarship_id).await?;
    Ok(Json(DataResponse {
        data: FavoriteStatus {
            scholarship_id,
            is_favorite,
        },
    }))
}

/// POST /api/v1/favorites/{scholarship_id}
///
/// Idempotent: bookmarking twice returns the existing bookmark.
pub async fn add_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(scholarship_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<Favorite>>)> {
    if !ScholarshipRepo::exists(&state.pool, scholarship_id).await? {
        return Err(AppError::Core(CoreError::not_found(
            "Scholarship",
            scholarship_id,
        )));
    }
    let favorite = FavoriteRepo::add(&state.pool, auth_user.user_id, scholarship_id).await?;
    tracing::debug!(user_id = auth_user.user_id, scholarship_id, "Favorite added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: favorite })))
}

/// DELETE /api/v1/favorites/{scholarship_id}
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(scholarship_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !FavoriteRepo::remove(&state.pool, auth_user.user_id, scholarship_id).await? {
        return Err(AppError::Core(CoreError::not_found("Favorite", scholarship_id)));
    }
    tracing::debug!(user_id = auth_user.user_id, scholarship_id, "Favorite removed");
    Ok(StatusCode::NO_CONTENT)
}
