//! Handlers for `/scholarships` (public catalogue) and
//! `/admin/scholarships` (back-office writes).
//!
//! The listing never fails because of the database: when the query errors,
//! or when an unfiltered listing finds an empty table, the static fallback
//! catalogue is served instead and the page is tagged `source = "fallback"`.
//! The featured list falls back to the featured fallback entries on error.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use scholarhub_core::error::CoreError;
use scholarhub_core::fallback::{apply_filter, find_fallback};
use scholarhub_core::scholarship::{
    clean_list, validate_amount_value, validate_currency, validate_description,
    validate_list_items, validate_title, validate_website,
};
use scholarhub_core::search::ScholarshipFilter;
use scholarhub_core::types::DbId;
use scholarhub_core::validation::{validate_optional, validate_required};
use scholarhub_db::models::scholarship::{
    CreateScholarship, Scholarship, ScholarshipPage, UpdateScholarship,
};
use scholarhub_db::repositories::ScholarshipRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

pub const SOURCE_DATABASE: &str = "database";
pub const SOURCE_FALLBACK: &str = "fallback";

/// Maximum length of country, level, field, amount and university name.
const MAX_SHORT_FIELD_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/scholarships
///
/// Filtered, sorted and paged search. See [`ScholarshipFilter`] for the
/// query parameters.
pub async fn list_scholarships(
    State(state): State<AppState>,
    Query(filter): Query<ScholarshipFilter>,
) -> AppResult<Json<DataResponse<ScholarshipPage>>> {
    let filter = filter.normalized();
    filter.validate()?;

    let page = match ScholarshipRepo::search(&state.pool, &state.columns, &filter).await {
        Ok((_, 0)) if filter.is_unfiltered() => {
            tracing::info!("Scholarships table is empty, serving fallback catalogue");
            fallback_page(&filter)
        }
        Ok((items, total)) => ScholarshipPage {
            items,
            total,
            limit: filter.limit(),
            offset: filter.offset(),
            source: SOURCE_DATABASE,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Scholarship search failed, serving fallback catalogue");
            fallback_page(&filter)
        }
    };

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/scholarships/featured
pub async fn featured_scholarships(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<Scholarship>>>> {
    let items = match ScholarshipRepo::featured(&state.pool, &state.columns, params.limit).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "Featured query failed, serving fallback catalogue");
            let filter = ScholarshipFilter {
                featured: Some(true),
                limit: params.limit,
                ..Default::default()
            };
            fallback_page(&filter).items
        }
    };
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/scholarships/{id}
///
/// Counts a view for database rows. Negative ids address the fallback
/// catalogue and are never counted.
pub async fn get_scholarship(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Scholarship>>> {
    if id < 0 {
        let scholarship = find_fallback(id)
            .map(Scholarship::from)
            .ok_or_else(|| AppError::Core(CoreError::not_found("Scholarship", id)))?;
        return Ok(Json(DataResponse { data: scholarship }));
    }

    let mut scholarship = ScholarshipRepo::find_by_id(&state.pool, &state.columns, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Scholarship", id)))?;

    if let Some(views) = ScholarshipRepo::increment_view(&state.pool, id).await? {
        scholarship.view_count = views;
    }

    Ok(Json(DataResponse { data: scholarship }))
}

/// GET /api/v1/scholarships/{id}/related
pub async fn related_scholarships(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<Scholarship>>>> {
    if !ScholarshipRepo::exists(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Scholarship", id)));
    }
    let items = ScholarshipRepo::related(&state.pool, &state.columns, id, params.limit).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/scholarships
pub async fn create_scholarship(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateScholarship>,
) -> AppResult<(StatusCode, Json<DataResponse<Scholarship>>)> {
    let input = CreateScholarship {
        title: input.title.trim().to_string(),
        country: input.country.trim().to_string(),
        level: input.level.trim().to_string(),
        field: input.field.trim().to_string(),
        amount: input.amount.trim().to_string(),
        currency: input.currency.map(|c| c.trim().to_uppercase()),
        eligibility: clean_list(&input.eligibility),
        benefits: clean_list(&input.benefits),
        application_process: clean_list(&input.application_process),
        ..input
    };

    validate_title(&input.title)?;
    validate_required("Country", &input.country, MAX_SHORT_FIELD_LENGTH)?;
    validate_required("Level", &input.level, MAX_SHORT_FIELD_LENGTH)?;
    validate_required("Field", &input.field, MAX_SHORT_FIELD_LENGTH)?;
    validate_optional("Amount", Some(&input.amount), MAX_SHORT_FIELD_LENGTH)?;
    validate_optional(
        "University name",
        input.university_name.as_deref(),
        MAX_SHORT_FIELD_LENGTH,
    )?;
    validate_description(&input.description)?;
    validate_list_items("Eligibility", &input.eligibility)?;
    validate_list_items("Benefits", &input.benefits)?;
    validate_list_items("Application process", &input.application_process)?;
    if let Some(amount) = input.amount_value {
        validate_amount_value(amount)?;
    }
    if let Some(currency) = &input.currency {
        validate_currency(currency)?;
    }
    if let Some(website) = &input.website {
        validate_website(website)?;
    }

    let scholarship = ScholarshipRepo::create(&state.pool, &input).await?;

    tracing::info!(
        scholarship_id = scholarship.id,
        user_id = admin.user_id,
        "Scholarship created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: scholarship })))
}

/// PUT /api/v1/admin/scholarships/{id}
///
/// Partial update; only supplied fields change.
pub async fn update_scholarship(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScholarship>,
) -> AppResult<Json<DataResponse<Scholarship>>> {
    let trimmed = |v: Option<String>| v.map(|s| s.trim().to_string());
    let input = UpdateScholarship {
        title: trimmed(input.title),
        country: trimmed(input.country),
        level: trimmed(input.level),
        field: trimmed(input.field),
        amount: trimmed(input.amount),
        currency: input.currency.map(|c| c.trim().to_uppercase()),
        eligibility: input.eligibility.as_deref().map(clean_list),
        benefits: input.benefits.as_deref().map(clean_list),
        application_process: input.application_process.as_deref().map(clean_list),
        ..input
    };

    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    for (name, value) in [
        ("Country", &input.country),
        ("Level", &input.level),
        ("Field", &input.field),
    ] {
        if let Some(v) = value {
            validate_required(name, v, MAX_SHORT_FIELD_LENGTH)?;
        }
    }
    validate_optional("Amount", input.amount.as_deref(), MAX_SHORT_FIELD_LENGTH)?;
    validate_optional(
        "University name",
        input.university_name.as_deref(),
        MAX_SHORT_FIELD_LENGTH,
    )?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    for (name, list) in [
        ("Eligibility", &input.eligibility),
        ("Benefits", &input.benefits),
        ("Application process", &input.application_process),
    ] {
        if let Some(items) = list {
            validate_list_items(name, items)?;
        }
    }
    if let Some(amount) = input.amount_value {
        validate_amount_value(amount)?;
    }
    if let Some(currency) = &input.currency {
        validate_currency(currency)?;
    }
    if let Some(website) = &input.website {
        validate_website(website)?;
    }

    let scholarship = ScholarshipRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Scholarship", id)))?;

    tracing::info!(scholarship_id = id, user_id = admin.user_id, "Scholarship updated");
    Ok(Json(DataResponse { data: scholarship }))
}

/// DELETE /api/v1/admin/scholarships/{id}
pub async fn delete_scholarship(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ScholarshipRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Scholarship", id)));
    }
    tracing::info!(scholarship_id = id, user_id = admin.user_id, "Scholarship deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fallback_page(filter: &ScholarshipFilter) -> ScholarshipPage {
    let page = apply_filter(filter);
    ScholarshipPage {
        items: page.items.into_iter().map(Scholarship::from).collect(),
        total: page.total,
        limit: filter.limit(),
        offset: filter.offset(),
        source: SOURCE_FALLBACK,
    }
}
