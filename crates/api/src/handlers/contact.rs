//! Handlers for the public contact form (`/contact`) and its admin inbox
//! (`/admin/contact-messages`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use scholarhub_core::contact::{validate_contact, validate_status};
use scholarhub_core::error::CoreError;
use scholarhub_core::types::DbId;
use scholarhub_core::validation::normalize_email;
use scholarhub_db::models::contact::{
    ContactListParams, ContactMessage, CreateContactMessage, UpdateContactStatus,
};
use scholarhub_db::repositories::ContactMessageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<CreateContactMessage>,
) -> AppResult<(StatusCode, Json<DataResponse<ContactMessage>>)> {
    validate_contact(&input.name, &input.email, &input.subject, &input.body)?;

    let input = CreateContactMessage {
        email: normalize_email(&input.email),
        ..input
    };
    let message = ContactMessageRepo::create(&state.pool, &input).await?;

    tracing::info!(message_id = message.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /api/v1/admin/contact-messages?status=&limit=&offset=
pub async fn list_messages(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ContactListParams>,
) -> AppResult<Json<DataResponse<Vec<ContactMessage>>>> {
    if let Some(status) = &params.status {
        validate_status(status)?;
    }
    let messages = ContactMessageRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// PUT /api/v1/admin/contact-messages/{id}
pub async fn update_message_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContactStatus>,
) -> AppResult<Json<DataResponse<ContactMessage>>> {
    validate_status(&input.status)?;
    let message = ContactMessageRepo::set_status(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ContactMessage", id)))?;

    tracing::info!(message_id = id, status = %message.status, user_id = admin.user_id, "Contact message updated");
    Ok(Json(DataResponse { data: message }))
}

/// DELETE /api/v1/admin/contact-messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ContactMessageRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("ContactMessage", id)));
    }
    tracing::info!(message_id = id, user_id = admin.user_id, "Contact message deleted");
    Ok(StatusCode::NO_CONTENT)
}
