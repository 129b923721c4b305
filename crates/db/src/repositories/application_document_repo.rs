//! Repository for the `application_documents` table (per-application checklist).

use sqlx::PgPool;
use scholarhub_core::types::DbId;

use crate::models::application::{
    ApplicationDocument, CreateApplicationDocument, UpdateApplicationDocument,
};

const COLUMNS: &str = "id, application_id, name, document_type, url, status, created_at, updated_at";

pub struct ApplicationDocumentRepo;

impl ApplicationDocumentRepo {
    pub async fn list(
        pool: &PgPool,
        application_id: DbId,
    ) -> Result<Vec<ApplicationDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM application_documents WHERE application_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, ApplicationDocument>(&query)
            .bind(application_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a document entry; type and status fall back to the column defaults.
    pub async fn create(
        pool: &PgPool,
        application_id: DbId,
        input: &CreateApplicationDocument,
    ) -> Result<ApplicationDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO application_documents (application_id, name, document_type, url, status)
             VALUES ($1, $2, COALESCE($3, 'other'), $4, COALESCE($5, 'missing'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationDocument>(&query)
            .bind(application_id)
            .bind(input.name.trim())
            .bind(&input.document_type)
            .bind(&input.url)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        application_id: DbId,
        id: DbId,
        input: &UpdateApplicationDocument,
    ) -> Result<Option<ApplicationDocument>, sqlx::Error> {
        let query = format!(
            "UPDATE application_documents SET
                name = COALESCE($3, name),
                document_type = COALESCE($4, document_type),
                url = COALESCE($5, url),
                status = COALESCE($6, status)
             WHERE id = $1 AND application_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationDocument>(&query)
            .bind(id)
            .bind(application_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.document_type)
            .bind(&input.url)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, application_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM application_documents WHERE id = $1 AND application_id = $2")
                .bind(id)
                .bind(application_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
