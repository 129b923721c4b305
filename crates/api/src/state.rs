use std::sync::Arc;

use scholarhub_core::search::ScholarshipColumns;
use scholarhub_db::repositories::SchemaRepo;

use crate::config::ServerConfig;
use crate::llm::EssayGenerator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: scholarhub_db::DbPool,
    /// Server configuration (JWT secrets, cookie flags).
    pub config: Arc<ServerConfig>,
    /// Physical column names of the `scholarships` table, resolved at startup.
    pub columns: Arc<ScholarshipColumns>,
    /// Essay drafting backend.
    pub essay_generator: Arc<dyn EssayGenerator>,
}

/// Introspect the `scholarships` table and resolve its column variants.
///
/// Falls back to the canonical layout when introspection fails or a required
/// column cannot be matched, so searches keep working (or fall back) rather
/// than blocking startup.
pub async fn load_scholarship_columns(pool: &scholarhub_db::DbPool) -> ScholarshipColumns {
    let present = match SchemaRepo::table_columns(pool, "scholarships").await {
        Ok(columns) => columns,
        Err(e) => {
            tracing::warn!(error = %e, "Could not introspect scholarships table, using canonical columns");
            return ScholarshipColumns::default();
        }
    };

    match ScholarshipColumns::resolve(&present) {
        Ok(columns) => {
            tracing::info!(?columns, "Resolved scholarship columns");
            columns
        }
        Err(e) => {
            tracing::warn!(error = %e, "Unrecognised scholarships layout, using canonical columns");
            ScholarshipColumns::default()
        }
    }
}
