//! Read models for the admin analytics dashboard.

use serde::Serialize;
use sqlx::FromRow;
use scholarhub_core::types::DbId;

/// Headline counts for the dashboard.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct DashboardTotals {
    pub scholarships: i64,
    pub featured_scholarships: i64,
    pub universities: i64,
    pub users: i64,
    pub applications: i64,
    pub favorites: i64,
    pub saved_essays: i64,
    pub unread_messages: i64,
    pub total_views: i64,
}

/// A scholarship ranked by view count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopScholarship {
    pub id: DbId,
    pub title: String,
    pub view_count: i64,
}

/// A generic `(label, count)` aggregate row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}

/// Full dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsDashboard {
    pub totals: DashboardTotals,
    pub top_viewed: Vec<TopScholarship>,
    pub scholarships_by_country: Vec<LabelCount>,
    pub applications_by_status: Vec<LabelCount>,
    pub messages_by_status: Vec<LabelCount>,
}
