//! Application tracker models: applications, their tasks and documents.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use scholarhub_core::types::{Date, DbId, Timestamp};

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub user_id: DbId,
    pub scholarship_id: DbId,
    pub status: String,
    pub notes: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Application row joined with scholarship info and checklist progress.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationSummary {
    pub id: DbId,
    pub scholarship_id: DbId,
    pub scholarship_title: String,
    pub scholarship_deadline: Option<Date>,
    pub status: String,
    pub notes: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub task_count: i64,
    pub completed_task_count: i64,
    pub document_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateApplication {
    pub scholarship_id: DbId,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateApplication {
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Query parameters for `GET /api/v1/applications`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationListParams {
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// A row from the `application_tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationTask {
    pub id: DbId,
    pub application_id: DbId,
    pub title: String,
    pub due_date: Option<Date>,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateApplicationTask {
    pub title: String,
    pub due_date: Option<Date>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateApplicationTask {
    pub title: Option<String>,
    pub due_date: Option<Date>,
    pub is_completed: Option<bool>,
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// A row from the `application_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationDocument {
    pub id: DbId,
    pub application_id: DbId,
    pub name: String,
    pub document_type: String,
    pub url: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateApplicationDocument {
    pub name: String,
    pub document_type: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateApplicationDocument {
    pub name: Option<String>,
    pub document_type: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
}
