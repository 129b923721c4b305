//! Aggregate queries backing the admin analytics dashboard.

use scholarhub_core::search::ScholarshipColumns;
use sqlx::PgPool;

use crate::models::analytics::{AnalyticsDashboard, DashboardTotals, LabelCount, TopScholarship};
use crate::repositories::{ApplicationRepo, ContactMessageRepo};

/// Number of entries in each ranked list.
const TOP_N: i64 = 10;

pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// Headline counts, computed in a single round trip.
    ///
    /// A table without a featured flag reports zero featured scholarships.
    pub async fn totals(
        pool: &PgPool,
        columns: &ScholarshipColumns,
    ) -> Result<DashboardTotals, sqlx::Error> {
        let featured = match columns.is_featured {
            Some(column) => format!("(SELECT COUNT(*) FROM scholarships WHERE {column})"),
            None => "0::BIGINT".to_string(),
        };
        let query = format!(
            "SELECT \
                (SELECT COUNT(*) FROM scholarships) AS scholarships, \
                {featured} AS featured_scholarships, \
                (SELECT COUNT(*) FROM universities) AS universities, \
                (SELECT COUNT(*) FROM users) AS users, \
                (SELECT COUNT(*) FROM applications) AS applications, \
                (SELECT COUNT(*) FROM favorites) AS favorites, \
                (SELECT COUNT(*) FROM saved_essays) AS saved_essays, \
                (SELECT COUNT(*) FROM contact_messages WHERE status = 'new') AS unread_messages, \
                (SELECT COALESCE(SUM(view_count), 0)::BIGINT FROM scholarship_views) AS total_views"
        );
        sqlx::query_as::<_, DashboardTotals>(&query)
            .fetch_one(pool)
            .await
    }

    /// Most viewed scholarships.
    pub async fn top_viewed(pool: &PgPool) -> Result<Vec<TopScholarship>, sqlx::Error> {
        sqlx::query_as::<_, TopScholarship>(
            "SELECT s.id, s.title, v.view_count \
             FROM scholarship_views v JOIN scholarships s ON s.id = v.scholarship_id \
             ORDER BY v.view_count DESC, s.id DESC LIMIT $1",
        )
        .bind(TOP_N)
        .fetch_all(pool)
        .await
    }

    pub async fn scholarships_by_country(pool: &PgPool) -> Result<Vec<LabelCount>, sqlx::Error> {
        sqlx::query_as::<_, LabelCount>(
            "SELECT country AS label, COUNT(*) AS count FROM scholarships \
             GROUP BY country ORDER BY count DESC, label LIMIT $1",
        )
        .bind(TOP_N)
        .fetch_all(pool)
        .await
    }

    /// Assemble the full dashboard.
    pub async fn dashboard(
        pool: &PgPool,
        columns: &ScholarshipColumns,
    ) -> Result<AnalyticsDashboard, sqlx::Error> {
        Ok(AnalyticsDashboard {
            totals: Self::totals(pool, columns).await?,
            top_viewed: Self::top_viewed(pool).await?,
            scholarships_by_country: Self::scholarships_by_country(pool).await?,
            applications_by_status: ApplicationRepo::count_by_status(pool).await?,
            messages_by_status: ContactMessageRepo::count_by_status(pool).await?,
        })
    }
}
