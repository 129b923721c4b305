//! Repository for the `saved_essays` table. All queries are scoped by `user_id`.

use sqlx::PgPool;
use scholarhub_core::types::DbId;

use crate::models::essay::{CreateSavedEssay, SavedEssay, UpdateSavedEssay};

const COLUMNS: &str = "id, user_id, scholarship_id, title, essay_type, prompt, content, \
                       word_count, options, created_at, updated_at";

pub struct SavedEssayRepo;

impl SavedEssayRepo {
    pub async fn create(pool: &PgPool, input: &CreateSavedEssay) -> Result<SavedEssay, sqlx::Error> {
        let query = format!(
            "INSERT INTO saved_essays
                (user_id, scholarship_id, title, essay_type, prompt, content, word_count, options)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SavedEssay>(&query)
            .bind(input.user_id)
            .bind(input.scholarship_id)
            .bind(&input.title)
            .bind(&input.essay_type)
            .bind(&input.prompt)
            .bind(&input.content)
            .bind(input.word_count)
            .bind(&input.options)
            .fetch_one(pool)
            .await
    }

    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<SavedEssay>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM saved_essays WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, SavedEssay>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// A user's essays, most recently edited first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<SavedEssay>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM saved_essays WHERE user_id = $1 ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, SavedEssay>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update an essay. `word_count` must be supplied whenever `content` is.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateSavedEssay,
        word_count: Option<i32>,
    ) -> Result<Option<SavedEssay>, sqlx::Error> {
        let query = format!(
            "UPDATE saved_essays SET
                title = COALESCE($3, title),
                essay_type = COALESCE($4, essay_type),
                prompt = COALESCE($5, prompt),
                content = COALESCE($6, content),
                word_count = COALESCE($7, word_count),
                options = COALESCE($8, options)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SavedEssay>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.essay_type)
            .bind(&input.prompt)
            .bind(&input.content)
            .bind(word_count)
            .bind(&input.options)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM saved_essays WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM saved_essays")
            .fetch_one(pool)
            .await
    }
}
