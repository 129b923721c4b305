//! Repository for the `favorites` table.

use sqlx::PgPool;
use scholarhub_core::search::ScholarshipColumns;
use scholarhub_core::types::DbId;

use crate::models::favorite::{Favorite, FavoriteWithScholarship};

const COLUMNS: &str = "id, user_id, scholarship_id, created_at";

/// Provides add/remove/list for a user's bookmarked scholarships.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Bookmark a scholarship. Idempotent: re-adding returns the existing row.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        scholarship_id: DbId,
    ) -> Result<Favorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO favorites (user_id, scholarship_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, scholarship_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .bind(scholarship_id)
            .fetch_one(pool)
            .await
    }

    /// Returns `true` if a bookmark was removed.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        scholarship_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND scholarship_id = $2")
                .bind(user_id)
                .bind(scholarship_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_favorite(
        pool: &PgPool,
        user_id: DbId,
        scholarship_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM favorites WHERE user_id = $1 AND scholarship_id = $2)",
        )
        .bind(user_id)
        .bind(scholarship_id)
        .fetch_one(pool)
        .await
    }

    /// A user's bookmarks with scholarship details, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        columns: &ScholarshipColumns,
        user_id: DbId,
    ) -> Result<Vec<FavoriteWithScholarship>, sqlx::Error> {
        let query = format!(
            "SELECT f.id, f.scholarship_id, s.title, s.country, s.amount, \
                    s.{deadline} AS deadline, s.{level} AS level, s.{field} AS field, f.created_at \
             FROM favorites f JOIN scholarships s ON s.id = f.scholarship_id \
             WHERE f.user_id = $1 \
             ORDER BY f.created_at DESC, f.id DESC",
            deadline = columns.deadline,
            level = columns.level,
            field = columns.field,
        );
        sqlx::query_as::<_, FavoriteWithScholarship>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
