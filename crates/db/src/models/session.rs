//! Refresh-token session model and DTOs.

use serde::Deserialize;
use sqlx::FromRow;
use scholarhub_core::types::{DbId, Timestamp};

/// A row from the `user_sessions` table. Only the refresh token hash is stored.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a session on login / refresh.
#[derive(Debug, Deserialize)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
