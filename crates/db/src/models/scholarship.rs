//! Scholarship entity model and DTOs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use scholarhub_core::fallback::FallbackScholarship;
use scholarhub_core::types::{Date, DbId, Timestamp};

/// A scholarship row, projected through
/// [`ScholarshipColumns::select_list`](scholarhub_core::search::ScholarshipColumns::select_list)
/// so that column-name variants arrive under their canonical names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scholarship {
    pub id: DbId,
    pub title: String,
    pub university_id: Option<DbId>,
    pub university_name: Option<String>,
    pub country: String,
    /// Display amount (e.g. `"Full funding"`, `"EUR 992 per month"`).
    pub amount: String,
    /// Numeric amount used for filtering and sorting.
    pub amount_value: Option<f64>,
    pub currency: String,
    pub deadline: Option<Date>,
    pub level: String,
    pub field: String,
    pub description: String,
    pub eligibility: Vec<String>,
    pub benefits: Vec<String>,
    pub application_process: Vec<String>,
    pub website: Option<String>,
    pub source_id: Option<DbId>,
    pub is_featured: bool,
    pub view_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<FallbackScholarship> for Scholarship {
    fn from(s: FallbackScholarship) -> Self {
        let now = Utc::now();
        let owned = |items: &[&str]| items.iter().map(|i| i.to_string()).collect();
        Self {
            id: s.id,
            title: s.title.to_string(),
            university_id: None,
            university_name: s.university_name.map(str::to_string),
            country: s.country.to_string(),
            amount: s.amount.to_string(),
            amount_value: s.amount_value,
            currency: s.currency.to_string(),
            deadline: s.deadline,
            level: s.level.to_string(),
            field: s.field.to_string(),
            description: s.description.to_string(),
            eligibility: owned(s.eligibility),
            benefits: owned(s.benefits),
            application_process: owned(s.application_process),
            website: Some(s.website.to_string()),
            source_id: None,
            is_featured: s.is_featured,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Compact scholarship info embedded in favorites and applications.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScholarshipSummary {
    pub id: DbId,
    pub title: String,
    pub country: String,
    pub amount: String,
    pub deadline: Option<Date>,
    pub level: String,
    pub field: String,
}

/// DTO for creating a scholarship from the admin back-office.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScholarship {
    pub title: String,
    pub university_id: Option<DbId>,
    pub university_name: Option<String>,
    pub country: String,
    #[serde(default)]
    pub amount: String,
    pub amount_value: Option<f64>,
    pub currency: Option<String>,
    pub deadline: Option<Date>,
    pub level: String,
    pub field: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub eligibility: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub application_process: Vec<String>,
    pub website: Option<String>,
    pub source_id: Option<DbId>,
    #[serde(default)]
    pub is_featured: bool,
}

/// DTO for updating a scholarship. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScholarship {
    pub title: Option<String>,
    pub university_id: Option<DbId>,
    pub university_name: Option<String>,
    pub country: Option<String>,
    pub amount: Option<String>,
    pub amount_value: Option<f64>,
    pub currency: Option<String>,
    pub deadline: Option<Date>,
    pub level: Option<String>,
    pub field: Option<String>,
    pub description: Option<String>,
    pub eligibility: Option<Vec<String>>,
    pub benefits: Option<Vec<String>>,
    pub application_process: Option<Vec<String>>,
    pub website: Option<String>,
    pub source_id: Option<DbId>,
    pub is_featured: Option<bool>,
}

/// One page of search results.
#[derive(Debug, Clone, Serialize)]
pub struct ScholarshipPage {
    pub items: Vec<Scholarship>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    /// `"database"` or `"fallback"`.
    pub source: &'static str,
}
