//! Handlers for the application tracker (`/applications`) and its checklist
//! tasks and documents.
//!
//! Every route is scoped to the signed-in user: an application owned by
//! someone else is reported as not found.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use scholarhub_core::application::{
    validate_document_name, validate_document_status, validate_document_type, validate_status,
    validate_task_title, validate_transition, MAX_NOTES_LENGTH, STATUS_PLANNING,
};
use scholarhub_core::error::CoreError;
use scholarhub_core::types::DbId;
use scholarhub_core::validation::{validate_optional, validate_url};
use scholarhub_db::models::application::{
    Application, ApplicationDocument, ApplicationListParams, ApplicationSummary, ApplicationTask,
    CreateApplication, CreateApplicationDocument, CreateApplicationTask, UpdateApplication,
    UpdateApplicationDocument, UpdateApplicationTask,
};
use scholarhub_db::repositories::{
    ApplicationDocumentRepo, ApplicationRepo, ApplicationTaskRepo, ScholarshipRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// An application with its full checklist.
#[derive(Debug, Serialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: ApplicationSummary,
    pub tasks: Vec<ApplicationTask>,
    pub documents: Vec<ApplicationDocument>,
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

/// GET /api/v1/applications?status=
pub async fn list_applications(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ApplicationListParams>,
) -> AppResult<Json<DataResponse<Vec<ApplicationSummary>>>> {
    let status = params.status.as_deref().map(str::trim).filter(|s| !s.is_empty());
    if let Some(status) = status {
        validate_status(status)?;
    }
    let items =
        ApplicationRepo::list_for_user(&state.pool, &state.columns, auth_user.user_id, status)
            .await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/applications
///
/// Start tracking a scholarship. One application per user and scholarship (409).
pub async fn create_application(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateApplication>,
) -> AppResult<(StatusCode, Json<DataResponse<Application>>)> {
    let status = input.status.as_deref().unwrap_or(STATUS_PLANNING);
    validate_status(status)?;
    validate_optional("Notes", input.notes.as_deref(), MAX_NOTES_LENGTH)?;

    if !ScholarshipRepo::exists(&state.pool, input.scholarship_id).await? {
        return Err(AppError::Core(CoreError::not_found(
            "Scholarship",
            input.scholarship_id,
        )));
    }

    let application = ApplicationRepo::create(
        &state.pool,
        auth_user.user_id,
        input.scholarship_id,
        status,
        input.notes.as_deref(),
    )
    .await?;

    tracing::info!(
        application_id = application.id,
        user_id = auth_user.user_id,
        scholarship_id = input.scholarship_id,
        "Application created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: application })))
}

/// GET /api/v1/applications/{id}
pub async fn get_application(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ApplicationDetail>>> {
    let application =
        ApplicationRepo::find_summary(&state.pool, &state.columns, auth_user.user_id, id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::not_found("Application", id)))?;

    let tasks = ApplicationTaskRepo::list(&state.pool, id).await?;
    let documents = ApplicationDocumentRepo::list(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: ApplicationDetail {
            application,
            tasks,
            documents,
        },
    }))
}

/// PUT /api/v1/applications/{id}
///
/// Change status (subject to the allowed transitions) and/or notes.
pub async fn update_application(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateApplication>,
) -> AppResult<Json<DataResponse<Application>>> {
    let current = owned_application(&state, &auth_user, id).await?;

    if let Some(next) = &input.status {
        validate_transition(&current.status, next)?;
    }
    validate_optional("Notes", input.notes.as_deref(), MAX_NOTES_LENGTH)?;

    let application = ApplicationRepo::update(
        &state.pool,
        auth_user.user_id,
        id,
        input.status.as_deref(),
        input.notes.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Application", id)))?;

    tracing::info!(
        application_id = id,
        user_id = auth_user.user_id,
        status = %application.status,
        "Application updated",
    );
    Ok(Json(DataResponse { data: application }))
}

/// DELETE /api/v1/applications/{id}
///
/// Tasks and documents are removed with it.
pub async fn delete_application(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ApplicationRepo::delete(&state.pool, auth_user.user_id, id).await? {
        return Err(AppError::Core(CoreError::not_found("Application", id)));
    }
    tracing::info!(application_id = id, user_id = auth_user.user_id, "Application deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// GET /api/v1/applications/{id}/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ApplicationTask>>>> {
    owned_application(&state, &auth_user, id).await?;
    let tasks = ApplicationTaskRepo::list(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// POST /api/v1/applications/{id}/tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateApplicationTask>,
) -> AppResult<(StatusCode, Json<DataResponse<ApplicationTask>>)> {
    owned_application(&state, &auth_user, id).await?;
    validate_task_title(&input.title)?;

    let input = CreateApplicationTask {
        title: input.title.trim().to_string(),
        ..input
    };
    let task = ApplicationTaskRepo::create(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// PUT /api/v1/applications/{id}/tasks/{task_id}
pub async fn update_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, task_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateApplicationTask>,
) -> AppResult<Json<DataResponse<ApplicationTask>>> {
    owned_application(&state, &auth_user, id).await?;
    if let Some(title) = &input.title {
        validate_task_title(title)?;
    }

    let input = UpdateApplicationTask {
        title: input.title.map(|t| t.trim().to_string()),
        ..input
    };
    let task = ApplicationTaskRepo::update(&state.pool, id, task_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ApplicationTask", task_id)))?;
    Ok(Json(DataResponse { data: task }))
}

/// DELETE /api/v1/applications/{id}/tasks/{task_id}
pub async fn delete_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    owned_application(&state, &auth_user, id).await?;
    if !ApplicationTaskRepo::delete(&state.pool, id, task_id).await? {
        return Err(AppError::Core(CoreError::not_found("ApplicationTask", task_id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// GET /api/v1/applications/{id}/documents
pub async fn list_documents(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ApplicationDocument>>>> {
    owned_application(&state, &auth_user, id).await?;
    let documents = ApplicationDocumentRepo::list(&state.pool, id).await?;
    Ok(Json(DataResponse { data: documents }))
}

/// POST /api/v1/applications/{id}/documents
pub async fn create_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateApplicationDocument>,
) -> AppResult<(StatusCode, Json<DataResponse<ApplicationDocument>>)> {
    owned_application(&state, &auth_user, id).await?;
    validate_document_name(&input.name)?;
    validate_document_fields(
        input.document_type.as_deref(),
        input.status.as_deref(),
        input.url.as_deref(),
    )?;

    let input = CreateApplicationDocument {
        name: input.name.trim().to_string(),
        ..input
    };
    let document = ApplicationDocumentRepo::create(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

/// PUT /api/v1/applications/{id}/documents/{doc_id}
pub async fn update_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, doc_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateApplicationDocument>,
) -> AppResult<Json<DataResponse<ApplicationDocument>>> {
    owned_application(&state, &auth_user, id).await?;
    if let Some(name) = &input.name {
        validate_document_name(name)?;
    }
    validate_document_fields(
        input.document_type.as_deref(),
        input.status.as_deref(),
        input.url.as_deref(),
    )?;

    let document = ApplicationDocumentRepo::update(&state.pool, id, doc_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ApplicationDocument", doc_id)))?;
    Ok(Json(DataResponse { data: document }))
}

/// DELETE /api/v1/applications/{id}/documents/{doc_id}
pub async fn delete_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, doc_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    owned_application(&state, &auth_user, id).await?;
    if !ApplicationDocumentRepo::delete(&state.pool, id, doc_id).await? {
        return Err(AppError::Core(CoreError::not_found(
            "ApplicationDocument",
            doc_id,
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load an application owned by the caller, or 404.
async fn owned_application(
    state: &AppState,
    auth_user: &AuthUser,
    id: DbId,
) -> AppResult<Application> {
    ApplicationRepo::find_for_user(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Application", id)))
}

fn validate_document_fields(
    document_type: Option<&str>,
    status: Option<&str>,
    url: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(document_type) = document_type {
        validate_document_type(document_type)?;
    }
    if let Some(status) = status {
        validate_document_status(status)?;
    }
    if let Some(url) = url {
        validate_url("Document URL", url)?;
    }
    Ok(())
}
