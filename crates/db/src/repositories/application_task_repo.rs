//! Repository for the `application_tasks` table.
//!
//! Callers verify that the parent application belongs to the requesting user
//! before calling in; every query here is scoped by `application_id`.

use sqlx::PgPool;
use scholarhub_core::types::DbId;

use crate::models::application::{ApplicationTask, CreateApplicationTask, UpdateApplicationTask};

const COLUMNS: &str = "id, application_id, title, due_date, is_completed, created_at, updated_at";

pub struct ApplicationTaskRepo;

impl ApplicationTaskRepo {
    /// Tasks of an application: open first, then by due date.
    pub async fn list(
        pool: &PgPool,
        application_id: DbId,
    ) -> Result<Vec<ApplicationTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM application_tasks WHERE application_id = $1 \
             ORDER BY is_completed, due_date ASC NULLS LAST, id"
        );
        sqlx::query_as::<_, ApplicationTask>(&query)
            .bind(application_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        application_id: DbId,
        input: &CreateApplicationTask,
    ) -> Result<ApplicationTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO application_tasks (application_id, title, due_date)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationTask>(&query)
            .bind(application_id)
            .bind(input.title.trim())
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        application_id: DbId,
        id: DbId,
        input: &UpdateApplicationTask,
    ) -> Result<Option<ApplicationTask>, sqlx::Error> {
        let query = format!(
            "UPDATE application_tasks SET
                title = COALESCE($3, title),
                due_date = COALESCE($4, due_date),
                is_completed = COALESCE($5, is_completed)
             WHERE id = $1 AND application_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationTask>(&query)
            .bind(id)
            .bind(application_id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.due_date)
            .bind(input.is_completed)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, application_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM application_tasks WHERE id = $1 AND application_id = $2")
                .bind(id)
                .bind(application_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
