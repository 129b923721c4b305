//! Repository for the `contact_messages` table.

use sqlx::PgPool;
use scholarhub_core::contact::STATUS_NEW;
use scholarhub_core::search::{clamp_limit, clamp_offset, MAX_SEARCH_LIMIT};
use scholarhub_core::types::DbId;

use crate::models::analytics::LabelCount;
use crate::models::contact::{ContactListParams, ContactMessage, CreateContactMessage};

const COLUMNS: &str = "id, name, email, subject, body, status, created_at, updated_at";

const DEFAULT_LIST_LIMIT: i64 = 50;

pub struct ContactMessageRepo;

impl ContactMessageRepo {
    /// Store a contact-form submission with status `new`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (name, email, subject, body, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(input.subject.trim())
            .bind(input.body.trim())
            .bind(STATUS_NEW)
            .fetch_one(pool)
            .await
    }

    /// Admin inbox, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        params: &ContactListParams,
    ) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_messages \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&params.status)
            .bind(clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_SEARCH_LIMIT))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE contact_messages SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<LabelCount>, sqlx::Error> {
        sqlx::query_as::<_, LabelCount>(
            "SELECT status AS label, COUNT(*) AS count FROM contact_messages \
             GROUP BY status ORDER BY count DESC, label",
        )
        .fetch_all(pool)
        .await
    }
}
