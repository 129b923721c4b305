//! Introspection of the live database schema.

use sqlx::PgPool;

/// Reads table metadata from `information_schema`.
pub struct SchemaRepo;

impl SchemaRepo {
    /// Column names of `table` in the current schema, in definition order.
    ///
    /// Returns an empty list if the table does not exist.
    pub async fn table_columns(pool: &PgPool, table: &str) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT column_name::TEXT FROM information_schema.columns \
             WHERE table_schema = current_schema() AND table_name = $1 \
             ORDER BY ordinal_position",
        )
        .bind(table)
        .fetch_all(pool)
        .await
    }
}
