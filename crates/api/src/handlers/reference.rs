//! Handlers for reference data (`/reference/{kind}`, `/admin/reference/{kind}`).
//!
//! `kind` is one of `countries`, `fields`, `levels`, `sources`; anything
//! else is a 400.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scholarhub_core::error::CoreError;
use scholarhub_core::types::DbId;
use scholarhub_core::validation::{validate_optional, validate_required};
use scholarhub_db::models::reference::{CreateReferenceItem, ReferenceItem, ReferenceKind};
use scholarhub_db::repositories::ReferenceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_NAME_LENGTH: usize = 120;
const MAX_DETAIL_LENGTH: usize = 500;

/// GET /api/v1/reference/{kind}
pub async fn list_reference(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<Json<DataResponse<Vec<ReferenceItem>>>> {
    let kind: ReferenceKind = kind.parse()?;
    let items = ReferenceRepo::list(&state.pool, kind).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/reference/{kind}
pub async fn create_reference(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(kind): Path<String>,
    Json(input): Json<CreateReferenceItem>,
) -> AppResult<(StatusCode, Json<DataResponse<ReferenceItem>>)> {
    let kind: ReferenceKind = kind.parse()?;
    validate_required("Name", &input.name, MAX_NAME_LENGTH)?;
    validate_optional("Detail", input.detail.as_deref(), MAX_DETAIL_LENGTH)?;

    let input = CreateReferenceItem {
        name: input.name.trim().to_string(),
        detail: input
            .detail
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        ..input
    };
    let item = ReferenceRepo::create(&state.pool, kind, &input).await?;

    tracing::info!(kind = kind.table(), item_id = item.id, user_id = admin.user_id, "Reference item created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// DELETE /api/v1/admin/reference/{kind}/{id}
pub async fn delete_reference(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let kind: ReferenceKind = kind.parse()?;
    if !ReferenceRepo::delete(&state.pool, kind, id).await? {
        return Err(AppError::Core(CoreError::not_found(kind.entity(), id)));
    }
    tracing::info!(kind = kind.table(), item_id = id, user_id = admin.user_id, "Reference item deleted");
    Ok(StatusCode::NO_CONTENT)
}
