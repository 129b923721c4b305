//! Repository for the `universities` table.

use sqlx::{PgPool, Postgres, QueryBuilder};
use scholarhub_core::search::{clamp_limit, clamp_offset, like_pattern, MAX_SEARCH_LIMIT};
use scholarhub_core::types::DbId;

use crate::models::university::{
    CreateUniversity, University, UniversityListParams, UniversitySummary, UpdateUniversity,
};

const COLUMNS: &str = "id, name, country, website, created_at, updated_at";

const DEFAULT_LIST_LIMIT: i64 = 50;

/// Provides CRUD operations for universities.
pub struct UniversityRepo;

impl UniversityRepo {
    pub async fn create(pool: &PgPool, input: &CreateUniversity) -> Result<University, sqlx::Error> {
        let query = format!(
            "INSERT INTO universities (name, country, website)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, University>(&query)
            .bind(&input.name)
            .bind(&input.country)
            .bind(&input.website)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<University>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM universities WHERE id = $1");
        sqlx::query_as::<_, University>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List universities with their scholarship counts, filtered by name
    /// substring and exact (case-insensitive) country.
    pub async fn list(
        pool: &PgPool,
        params: &UniversityListParams,
    ) -> Result<Vec<UniversitySummary>, sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT u.id, u.name, u.country, u.website, COUNT(s.id) AS scholarship_count \
             FROM universities u LEFT JOIN scholarships s ON s.university_id = u.id WHERE TRUE",
        );
        if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            query.push(" AND u.name ILIKE ");
            query.push_bind(like_pattern(q));
            query.push(" ESCAPE '\\'");
        }
        if let Some(country) = params.country.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            query.push(" AND LOWER(u.country) = LOWER(");
            query.push_bind(country.to_string());
            query.push(")");
        }
        query.push(" GROUP BY u.id ORDER BY u.name LIMIT ");
        query.push_bind(clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_SEARCH_LIMIT));
        query.push(" OFFSET ");
        query.push_bind(clamp_offset(params.offset));

        query.build_query_as::<UniversitySummary>().fetch_all(pool).await
    }

    /// Update a university. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUniversity,
    ) -> Result<Option<University>, sqlx::Error> {
        let query = format!(
            "UPDATE universities SET
                name = COALESCE($2, name),
                country = COALESCE($3, country),
                website = COALESCE($4, website)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, University>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.country)
            .bind(&input.website)
            .fetch_optional(pool)
            .await
    }

    /// Delete a university. Linked scholarships keep their row with
    /// `university_id` cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM universities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
