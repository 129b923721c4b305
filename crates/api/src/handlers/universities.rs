//! Handlers for `/universities` and `/admin/universities`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use scholarhub_core::error::CoreError;
use scholarhub_core::types::DbId;
use scholarhub_core::validation::{validate_required, validate_url};
use scholarhub_db::models::university::{
    CreateUniversity, University, UniversityListParams, UniversitySummary, UpdateUniversity,
};
use scholarhub_db::repositories::UniversityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_NAME_LENGTH: usize = 200;
const MAX_COUNTRY_LENGTH: usize = 100;

/// GET /api/v1/universities?q=&country=&limit=&offset=
pub async fn list_universities(
    State(state): State<AppState>,
    Query(params): Query<UniversityListParams>,
) -> AppResult<Json<DataResponse<Vec<UniversitySummary>>>> {
    let items = UniversityRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/universities/{id}
pub async fn get_university(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<University>>> {
    let university = UniversityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("University", id)))?;
    Ok(Json(DataResponse { data: university }))
}

/// POST /api/v1/admin/universities
pub async fn create_university(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUniversity>,
) -> AppResult<(StatusCode, Json<DataResponse<University>>)> {
    validate_required("Name", &input.name, MAX_NAME_LENGTH)?;
    validate_required("Country", &input.country, MAX_COUNTRY_LENGTH)?;
    if let Some(website) = &input.website {
        validate_url("Website", website)?;
    }

    let input = CreateUniversity {
        name: input.name.trim().to_string(),
        country: input.country.trim().to_string(),
        ..input
    };
    let university = UniversityRepo::create(&state.pool, &input).await?;

    tracing::info!(university_id = university.id, user_id = admin.user_id, "University created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: university })))
}

/// PUT /api/v1/admin/universities/{id}
pub async fn update_university(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUniversity>,
) -> AppResult<Json<DataResponse<University>>> {
    if let Some(name) = &input.name {
        validate_required("Name", name, MAX_NAME_LENGTH)?;
    }
    if let Some(country) = &input.country {
        validate_required("Country", country, MAX_COUNTRY_LENGTH)?;
    }
    if let Some(website) = &input.website {
        validate_url("Website", website)?;
    }

    let university = UniversityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("University", id)))?;

    tracing::info!(university_id = id, user_id = admin.user_id, "University updated");
    Ok(Json(DataResponse { data: university }))
}

/// DELETE /api/v1/admin/universities/{id}
///
/// Scholarships keep their denormalized `university_name`; only the link is dropped.
pub async fn delete_university(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !UniversityRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("University", id)));
    }
    tracing::info!(university_id = id, user_id = admin.user_id, "University deleted");
    Ok(StatusCode::NO_CONTENT)
}
