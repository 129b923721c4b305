//! Handlers for essay drafting (`/essays/generate`) and saved essays (`/essays`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scholarhub_core::error::CoreError;
use scholarhub_core::essay::{
    count_words, validate_content, validate_essay_type, EssayOptions, EssayRequest,
    DEFAULT_ESSAY_TYPE, MAX_PROMPT_LENGTH,
};
use scholarhub_core::types::DbId;
use scholarhub_core::validation::{validate_optional, validate_required};
use scholarhub_db::models::essay::{CreateSavedEssay, SaveEssayRequest, SavedEssay, UpdateSavedEssay};
use scholarhub_db::repositories::{SavedEssayRepo, ScholarshipRepo};

use crate::error::{AppError, AppResult};
use crate::llm::GeneratedEssay;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_TITLE_LENGTH: usize = 200;

/// POST /api/v1/essays/generate
///
/// Draft an essay with the configured LLM. The draft is returned, not stored;
/// the client saves it through `POST /essays` if the user keeps it.
pub async fn generate_essay(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<EssayRequest>,
) -> AppResult<Json<DataResponse<GeneratedEssay>>> {
    input.validate()?;

    tracing::info!(
        user_id = auth_user.user_id,
        essay_type = %input.essay_type,
        word_count = input.target_words(),
        "Generating essay draft",
    );

    let essay = state.essay_generator.generate(&input).await?;

    tracing::info!(
        user_id = auth_user.user_id,
        model = %essay.model,
        words = essay.word_count,
        "Essay draft generated",
    );
    Ok(Json(DataResponse { data: essay }))
}

/// GET /api/v1/essays
pub async fn list_essays(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SavedEssay>>>> {
    let essays = SavedEssayRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: essays }))
}

/// POST /api/v1/essays
pub async fn create_essay(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SaveEssayRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SavedEssay>>)> {
    let essay_type = input
        .essay_type
        .unwrap_or_else(|| DEFAULT_ESSAY_TYPE.to_string());

    validate_required("Title", &input.title, MAX_TITLE_LENGTH)?;
    validate_essay_type(&essay_type)?;
    validate_optional("Prompt", Some(&input.prompt), MAX_PROMPT_LENGTH)?;
    validate_content(&input.content)?;
    let options = input.options.map(normalize_options).transpose()?;
    if let Some(scholarship_id) = input.scholarship_id {
        if !ScholarshipRepo::exists(&state.pool, scholarship_id).await? {
            return Err(AppError::Core(CoreError::not_found(
                "Scholarship",
                scholarship_id,
            )));
        }
    }

    let essay = SavedEssayRepo::create(
        &state.pool,
        &CreateSavedEssay {
            user_id: auth_user.user_id,
            scholarship_id: input.scholarship_id,
            title: input.title.trim().to_string(),
            essay_type,
            prompt: input.prompt,
            word_count: count_words(&input.content),
            content: input.content,
            options: options.unwrap_or_else(|| serde_json::json!({})),
        },
    )
    .await?;

    tracing::info!(essay_id = essay.id, user_id = auth_user.user_id, "Essay saved");
    Ok((StatusCode::CREATED, Json(DataResponse { data: essay })))
}

/// GET /api/v1/essays/{id}
pub async fn get_essay(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SavedEssay>>> {
    let essay = SavedEssayRepo::find_for_user(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("SavedEssay", id)))?;
    Ok(Json(DataResponse { data: essay }))
}

/// PUT /api/v1/essays/{id}
///
/// The word count is recomputed whenever `content` is supplied.
pub async fn update_essay(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSavedEssay>,
) -> AppResult<Json<DataResponse<SavedEssay>>> {
    if let Some(title) = &input.title {
        validate_required("Title", title, MAX_TITLE_LENGTH)?;
    }
    if let Some(essay_type) = &input.essay_type {
        validate_essay_type(essay_type)?;
    }
    validate_optional("Prompt", input.prompt.as_deref(), MAX_PROMPT_LENGTH)?;
    if let Some(content) = &input.content {
        validate_content(content)?;
    }
    let options = input.options.map(normalize_options).transpose()?;

    let word_count = input.content.as_deref().map(count_words);
    let input = UpdateSavedEssay {
        title: input.title.map(|t| t.trim().to_string()),
        options,
        ..input
    };

    let essay = SavedEssayRepo::update(&state.pool, auth_user.user_id, id, &input, word_count)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("SavedEssay", id)))?;

    tracing::info!(essay_id = id, user_id = auth_user.user_id, "Essay updated");
    Ok(Json(DataResponse { data: essay }))
}

/// DELETE /api/v1/essays/{id}
pub async fn delete_essay(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SavedEssayRepo::delete(&state.pool, auth_user.user_id, id).await? {
        return Err(AppError::Core(CoreError::not_found("SavedEssay", id)));
    }
    tracing::info!(essay_id = id, user_id = auth_user.user_id, "Essay deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Parse `options` as [`EssayOptions`], validate it, and return the stored
/// form with defaults filled in.
fn normalize_options(options: serde_json::Value) -> Result<serde_json::Value, CoreError> {
    if !options.is_object() {
        return Err(CoreError::Validation("options must be a JSON object".into()));
    }
    let options: EssayOptions = serde_json::from_value(options)
        .map_err(|e| CoreError::Validation(format!("Invalid essay options: {e}")))?;
    options.validate()?;
    serde_json::to_value(&options)
        .map_err(|e| CoreError::Internal(format!("Failed to encode essay options: {e}")))
}
