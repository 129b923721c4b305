//! Saved essay model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use scholarhub_core::types::{DbId, Timestamp};

/// A row from the `saved_essays` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SavedEssay {
    pub id: DbId,
    pub user_id: DbId,
    pub scholarship_id: Option<DbId>,
    pub title: String,
    pub essay_type: String,
    pub prompt: String,
    pub content: String,
    pub word_count: i32,
    /// Customization options (`EssayOptions` from core) as JSON.
    pub options: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO. `word_count` is computed by the caller from `content`.
#[derive(Debug, Clone)]
pub struct CreateSavedEssay {
    pub user_id: DbId,
    pub scholarship_id: Option<DbId>,
    pub title: String,
    pub essay_type: String,
    pub prompt: String,
    pub content: String,
    pub word_count: i32,
    pub options: serde_json::Value,
}

/// Body of `POST /api/v1/essays`.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveEssayRequest {
    pub title: String,
    pub scholarship_id: Option<DbId>,
    pub essay_type: Option<String>,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub content: String,
    pub options: Option<serde_json::Value>,
}

/// Body of `PUT /api/v1/essays/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSavedEssay {
    pub title: Option<String>,
    pub essay_type: Option<String>,
    pub prompt: Option<String>,
    pub content: Option<String>,
    pub options: Option<serde_json::Value>,
}
