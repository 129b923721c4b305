//! Favorite (bookmarked scholarship) models.

use serde::Serialize;
use sqlx::FromRow;
use scholarhub_core::types::{Date, DbId, Timestamp};

/// A row from the `favorites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub scholarship_id: DbId,
    pub created_at: Timestamp,
}

/// A favorite joined with the scholarship fields shown in the saved list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FavoriteWithScholarship {
    pub id: DbId,
    pub scholarship_id: DbId,
    pub title: String,
    pub country: String,
    pub amount: String,
    pub deadline: Option<Date>,
    pub level: String,
    pub field: String,
    pub created_at: Timestamp,
}
