//! Repository for the four reference tables (countries, fields of study,
//! academic levels, scholarship sources).
//!
//! Table and column names come from [`ReferenceKind`], never from user input.

use sqlx::PgPool;
use scholarhub_core::types::DbId;

use crate::models::reference::{CreateReferenceItem, ReferenceItem, ReferenceKind};

fn columns(kind: ReferenceKind) -> String {
    let detail = kind
        .detail_column()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "NULL::TEXT".to_string());
    format!("id, name, {detail} AS detail, created_at")
}

/// Provides list/create/delete for reference data.
pub struct ReferenceRepo;

impl ReferenceRepo {
    pub async fn list(pool: &PgPool, kind: ReferenceKind) -> Result<Vec<ReferenceItem>, sqlx::Error> {
        let query = format!(
            "SELECT {cols} FROM {table} ORDER BY {order}",
            cols = columns(kind),
            table = kind.table(),
            order = kind.order_by(),
        );
        sqlx::query_as::<_, ReferenceItem>(&query).fetch_all(pool).await
    }

    /// Insert a reference item. `detail` is ignored for tables without a
    /// detail column and `sort_order` for tables other than academic levels.
    pub async fn create(
        pool: &PgPool,
        kind: ReferenceKind,
        input: &CreateReferenceItem,
    ) -> Result<ReferenceItem, sqlx::Error> {
        let table = kind.table();
        let cols = columns(kind);
        match (kind, kind.detail_column()) {
            (ReferenceKind::Levels, _) => {
                let query = format!(
                    "INSERT INTO {table} (name, sort_order) VALUES ($1, COALESCE($2, 0)) \
                     RETURNING {cols}"
                );
                sqlx::query_as::<_, ReferenceItem>(&query)
                    .bind(&input.name)
                    .bind(input.sort_order)
                    .fetch_one(pool)
                    .await
            }
            (_, Some(detail)) => {
                let query = format!(
                    "INSERT INTO {table} (name, {detail}) VALUES ($1, $2) RETURNING {cols}"
                );
                sqlx::query_as::<_, ReferenceItem>(&query)
                    .bind(&input.name)
                    .bind(&input.detail)
                    .fetch_one(pool)
                    .await
            }
            (_, None) => {
                let query = format!("INSERT INTO {table} (name) VALUES ($1) RETURNING {cols}");
                sqlx::query_as::<_, ReferenceItem>(&query)
                    .bind(&input.name)
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, kind: ReferenceKind, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
