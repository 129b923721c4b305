//! University entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use scholarhub_core::types::{DbId, Timestamp};

/// A row from the `universities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct University {
    pub id: DbId,
    pub name: String,
    pub country: String,
    pub website: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// University listing row with the number of linked scholarships.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UniversitySummary {
    pub id: DbId,
    pub name: String,
    pub country: String,
    pub website: Option<String>,
    pub scholarship_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUniversity {
    pub name: String,
    pub country: String,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUniversity {
    pub name: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
}

/// Query parameters for `GET /api/v1/universities`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UniversityListParams {
    pub q: Option<String>,
    pub country: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
