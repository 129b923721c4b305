//! Handlers for `/admin/users` (user listing and role changes).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use scholarhub_core::error::CoreError;
use scholarhub_core::types::DbId;
use scholarhub_db::models::user::UserResponse;
use scholarhub_db::repositories::{RoleRepo, SessionRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    /// Role name, `"admin"` or `"user"`.
    pub role: String,
}

/// GET /api/v1/admin/users?limit=&offset=
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: users }))
}

/// PUT /api/v1/admin/users/{id}/role
///
/// Admins cannot change their own role. The user's refresh sessions are
/// revoked so the new role takes effect at the next sign-in. An access token
/// already issued keeps its old role claim until it expires.
pub async fn change_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ChangeRoleRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if id == admin.user_id {
        return Err(AppError::BadRequest("You cannot change your own role".into()));
    }

    let role = RoleRepo::find_by_name(&state.pool, input.role.trim())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown role '{}'",
                input.role
            )))
        })?;

    if !UserRepo::set_role(&state.pool, id, role.id).await? {
        return Err(AppError::Core(CoreError::not_found("User", id)));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    let user = UserRepo::find_response(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", id)))?;

    tracing::info!(target_user_id = id, role = %user.role, user_id = admin.user_id, "User role changed");
    Ok(Json(DataResponse { data: user }))
}
