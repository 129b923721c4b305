//! Repository for the `applications` table.
//!
//! Every query is scoped by `user_id` so one user can never read or modify
//! another user's applications.

use sqlx::PgPool;
use scholarhub_core::application::stamps_submission;
use scholarhub_core::search::ScholarshipColumns;
use scholarhub_core::types::DbId;

use crate::models::analytics::LabelCount;
use crate::models::application::{Application, ApplicationSummary};

const COLUMNS: &str =
    "id, user_id, scholarship_id, status, notes, submitted_at, created_at, updated_at";

/// Summary projection: scholarship info plus checklist counts.
fn summary_select(columns: &ScholarshipColumns) -> String {
    format!(
        "SELECT a.id, a.scholarship_id, s.title AS scholarship_title, \
                s.{deadline} AS scholarship_deadline, a.status, a.notes, a.submitted_at, \
                (SELECT COUNT(*) FROM application_tasks t WHERE t.application_id = a.id) AS task_count, \
                (SELECT COUNT(*) FROM application_tasks t \
                   WHERE t.application_id = a.id AND t.is_completed) AS completed_task_count, \
                (SELECT COUNT(*) FROM application_documents d WHERE d.application_id = a.id) AS document_count, \
                a.created_at, a.updated_at \
         FROM applications a JOIN scholarships s ON s.id = a.scholarship_id",
        deadline = columns.deadline,
    )
}

/// Provides CRUD operations for a user's applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Start tracking an application. `submitted_at` is stamped when the
    /// initial status is `submitted`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        scholarship_id: DbId,
        status: &str,
        notes: Option<&str>,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications (user_id, scholarship_id, status, notes, submitted_at)
             VALUES ($1, $2, $3, $4, CASE WHEN $5 THEN NOW() END)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(user_id)
            .bind(scholarship_id)
            .bind(status)
            .bind(notes)
            .bind(stamps_submission(status))
            .fetch_one(pool)
            .await
    }

    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Summary of a single application.
    pub async fn find_summary(
        pool: &PgPool,
        columns: &ScholarshipColumns,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<ApplicationSummary>, sqlx::Error> {
        let query = format!("{} WHERE a.id = $1 AND a.user_id = $2", summary_select(columns));
        sqlx::query_as::<_, ApplicationSummary>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// A user's applications, soonest deadline first (no deadline last).
    pub async fn list_for_user(
        pool: &PgPool,
        columns: &ScholarshipColumns,
        user_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<ApplicationSummary>, sqlx::Error> {
        let query = format!(
            "{select} WHERE a.user_id = $1 AND ($2::TEXT IS NULL OR a.status = $2) \
             ORDER BY s.{deadline} ASC NULLS LAST, a.id DESC",
            select = summary_select(columns),
            deadline = columns.deadline,
        );
        sqlx::query_as::<_, ApplicationSummary>(&query)
            .bind(user_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update status and/or notes. `submitted_at` is stamped the first time the
    /// status becomes `submitted` and never cleared afterwards.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        status: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET
                status = COALESCE($3, status),
                notes = COALESCE($4, notes),
                submitted_at = CASE
                    WHEN $5 AND submitted_at IS NULL THEN NOW()
                    ELSE submitted_at
                END
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(user_id)
            .bind(status)
            .bind(notes)
            .bind(status.is_some_and(stamps_submission))
            .fetch_optional(pool)
            .await
    }

    /// Delete an application; its tasks and documents cascade.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Application counts grouped by status, across all users.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<LabelCount>, sqlx::Error> {
        sqlx::query_as::<_, LabelCount>(
            "SELECT status AS label, COUNT(*) AS count FROM applications \
             GROUP BY status ORDER BY count DESC, label",
        )
        .fetch_all(pool)
        .await
    }
}
