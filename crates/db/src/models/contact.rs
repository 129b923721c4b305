//! Contact message model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use scholarhub_core::types::{DbId, Timestamp};

/// A row from the `contact_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of the public `POST /api/v1/contact` form.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
}

/// Body of `PUT /api/v1/admin/contact-messages/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContactStatus {
    pub status: String,
}

/// Query parameters for the admin inbox.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
