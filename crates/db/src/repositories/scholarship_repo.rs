//! Repository for the `scholarships` and `scholarship_views` tables.
//!
//! Reads go through [`ScholarshipColumns`] so that column-name variants are
//! aliased to canonical names; the search query is assembled with
//! [`QueryBuilder`] and binds every user-supplied value as a parameter.
//! Writes target the canonical schema created by the bundled migrations.

use sqlx::{PgPool, Postgres, QueryBuilder};
use scholarhub_core::search::{
    clamp_limit, like_pattern, ScholarshipColumns, ScholarshipFilter, DEFAULT_FEATURED_LIMIT,
    DEFAULT_RELATED_LIMIT, MAX_SEARCH_LIMIT,
};
use scholarhub_core::types::DbId;

use crate::models::scholarship::{CreateScholarship, Scholarship, UpdateScholarship};

/// `FROM` clause shared by every read; `v` supplies the view count.
const FROM_CLAUSE: &str =
    " FROM scholarships s LEFT JOIN scholarship_views v ON v.scholarship_id = s.id";

/// Provides search and CRUD operations for scholarships.
pub struct ScholarshipRepo;

impl ScholarshipRepo {
    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Search scholarships, returning one page plus the total number of matches.
    ///
    /// Every supplied filter must match. The caller is expected to have
    /// validated the filter; an unparseable sort order falls back to newest.
    pub async fn search(
        pool: &PgPool,
        columns: &ScholarshipColumns,
        filter: &ScholarshipFilter,
    ) -> Result<(Vec<Scholarship>, i64), sqlx::Error> {
        let filter = filter.normalized();
        let sort = filter.sort_order().unwrap_or_default();

        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
        count_query.push(FROM_CLAUSE);
        push_filters(&mut count_query, columns, &filter);
        let total: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query.push(columns.select_list());
        query.push(FROM_CLAUSE);
        push_filters(&mut query, columns, &filter);
        query.push(" ORDER BY ");
        query.push(columns.order_by(sort));
        query.push(" LIMIT ");
        query.push_bind(filter.limit());
        query.push(" OFFSET ");
        query.push_bind(filter.offset());

        tracing::debug!(sql = query.sql(), "Scholarship search");

        let items = query.build_query_as::<Scholarship>().fetch_all(pool).await?;
        Ok((items, total))
    }

    /// Featured scholarships, most viewed first.
    pub async fn featured(
        pool: &PgPool,
        columns: &ScholarshipColumns,
        limit: Option<i64>,
    ) -> Result<Vec<Scholarship>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_FEATURED_LIMIT, MAX_SEARCH_LIMIT);
        let featured = match columns.is_featured {
            Some(c) => format!("s.{c}"),
            // Without a featured flag, the most viewed scholarships stand in.
            None => "TRUE".to_string(),
        };
        let query = format!(
            "SELECT {select}{FROM_CLAUSE} WHERE {featured} \
             ORDER BY COALESCE(v.view_count, 0) DESC, s.id DESC LIMIT $1",
            select = columns.select_list(),
        );
        sqlx::query_as::<_, Scholarship>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Scholarships sharing the field or country of `id`, excluding `id` itself.
    pub async fn related(
        pool: &PgPool,
        columns: &ScholarshipColumns,
        id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<Scholarship>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_RELATED_LIMIT, MAX_SEARCH_LIMIT);
        let query = format!(
            "SELECT {select}{FROM_CLAUSE} \
             JOIN scholarships base ON base.id = $1 \
             WHERE s.id <> base.id \
               AND (LOWER(s.{field}) = LOWER(base.{field}) OR LOWER(s.country) = LOWER(base.country)) \
             ORDER BY (LOWER(s.{field}) = LOWER(base.{field})) DESC, \
                      COALESCE(v.view_count, 0) DESC, s.id DESC \
             LIMIT $2",
            select = columns.select_list(),
            field = columns.field,
        );
        sqlx::query_as::<_, Scholarship>(&query)
            .bind(id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Find a scholarship by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        columns: &ScholarshipColumns,
        id: DbId,
    ) -> Result<Option<Scholarship>, sqlx::Error> {
        let query = format!(
            "SELECT {select}{FROM_CLAUSE} WHERE s.id = $1",
            select = columns.select_list()
        );
        sqlx::query_as::<_, Scholarship>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new scholarship, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateScholarship) -> Result<Scholarship, sqlx::Error> {
        let query = format!(
            "WITH s AS ( \
                 INSERT INTO scholarships (title, university_id, university_name, country, amount, \
                     amount_value, currency, deadline, level, field, description, eligibility, \
                     benefits, application_process, website, source_id, is_featured) \
                 VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'USD'), $8, $9, $10, $11, $12, \
                     $13, $14, $15, $16, $17) \
                 RETURNING * \
             ) \
             SELECT {select} FROM s LEFT JOIN scholarship_views v ON v.scholarship_id = s.id",
            select = ScholarshipColumns::default().select_list()
        );
        sqlx::query_as::<_, Scholarship>(&query)
            .bind(&input.title)
            .bind(input.university_id)
            .bind(&input.university_name)
            .bind(&input.country)
            .bind(&input.amount)
            .bind(input.amount_value)
            .bind(&input.currency)
            .bind(input.deadline)
            .bind(&input.level)
            .bind(&input.field)
            .bind(&input.description)
            .bind(&input.eligibility)
            .bind(&input.benefits)
            .bind(&input.application_process)
            .bind(&input.website)
            .bind(input.source_id)
            .bind(input.is_featured)
            .fetch_one(pool)
            .await
    }

    /// Update a scholarship. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateScholarship,
    ) -> Result<Option<Scholarship>, sqlx::Error> {
        let query = format!(
            "WITH s AS ( \
                 UPDATE scholarships SET \
                     title = COALESCE($2, title), \
                     university_id = COALESCE($3, university_id), \
                     university_name = COALESCE($4, university_name), \
                     country = COALESCE($5, country), \
                     amount = COALESCE($6, amount), \
                     amount_value = COALESCE($7, amount_value), \
                     currency = COALESCE($8, currency), \
                     deadline = COALESCE($9, deadline), \
                     level = COALESCE($10, level), \
                     field = COALESCE($11, field), \
                     description = COALESCE($12, description), \
                     eligibility = COALESCE($13, eligibility), \
                     benefits = COALESCE($14, benefits), \
                     application_process = COALESCE($15, application_process), \
                     website = COALESCE($16, website), \
                     source_id = COALESCE($17, source_id), \
                     is_featured = COALESCE($18, is_featured) \
                 WHERE id = $1 \
                 RETURNING * \
             ) \
             SELECT {select} FROM s LEFT JOIN scholarship_views v ON v.scholarship_id = s.id",
            select = ScholarshipColumns::default().select_list()
        );
        sqlx::query_as::<_, Scholarship>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.university_id)
            .bind(&input.university_name)
            .bind(&input.country)
            .bind(&input.amount)
            .bind(input.amount_value)
            .bind(&input.currency)
            .bind(input.deadline)
            .bind(&input.level)
            .bind(&input.field)
            .bind(&input.description)
            .bind(&input.eligibility)
            .bind(&input.benefits)
            .bind(&input.application_process)
            .bind(&input.website)
            .bind(input.source_id)
            .bind(input.is_featured)
            .fetch_optional(pool)
            .await
    }

    /// Delete a scholarship. Favorites, applications and view counts cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scholarships WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a scholarship with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM scholarships WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Atomically increment the view counter, returning the new count.
    ///
    /// Returns `None` if the scholarship does not exist.
    pub async fn increment_view(pool: &PgPool, id: DbId) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO scholarship_views (scholarship_id, view_count, last_viewed_at) \
             SELECT id, 1, NOW() FROM scholarships WHERE id = $1 \
             ON CONFLICT (scholarship_id) DO UPDATE SET \
                 view_count = scholarship_views.view_count + 1, \
                 last_viewed_at = NOW() \
             RETURNING view_count",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

/// Append ` WHERE ...` for every supplied filter.
///
/// Columns missing from the table make their filter unsatisfiable (or, for a
/// `featured = false` filter, trivially true), matching SQL `NULL` semantics.
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, columns: &ScholarshipColumns, filter: &ScholarshipFilter) {
    query.push(" WHERE TRUE");

    if let Some(country) = &filter.country {
        query.push(" AND LOWER(s.country) = LOWER(");
        query.push_bind(country.clone());
        query.push(")");
    }
    if let Some(field) = &filter.field {
        query.push(format!(" AND LOWER(s.{}) = LOWER(", columns.field));
        query.push_bind(field.clone());
        query.push(")");
    }
    if let Some(level) = &filter.level {
        query.push(format!(" AND LOWER(s.{}) = LOWER(", columns.level));
        query.push_bind(level.clone());
        query.push(")");
    }

    match (columns.amount_expr(), filter.min_amount, filter.max_amount) {
        (_, None, None) => {}
        (None, _, _) => {
            query.push(" AND FALSE");
        }
        (Some(amount), min, max) => {
            if let Some(min) = min {
                query.push(format!(" AND {amount} >= "));
                query.push_bind(min);
            }
            if let Some(max) = max {
                query.push(format!(" AND {amount} <= "));
                query.push_bind(max);
            }
        }
    }

    if let Some(featured) = filter.featured {
        match columns.is_featured {
            Some(c) => {
                query.push(format!(" AND s.{c} = "));
                query.push_bind(featured);
            }
            None if featured => {
                query.push(" AND FALSE");
            }
            None => {}
        }
    }

    if let Some(university_id) = filter.university_id {
        query.push(" AND s.university_id = ");
        query.push_bind(university_id);
    }

    if let Some(after) = filter.deadline_after {
        query.push(format!(" AND s.{} >= ", columns.deadline));
        query.push_bind(after);
    }

    let university = columns
        .university_expr()
        .map(|u| format!("COALESCE({u}, '')"));
    for term in filter.terms() {
        let pattern = like_pattern(&term);
        query.push(" AND (s.title ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" ESCAPE '\\' OR s.description ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" ESCAPE '\\' OR s.country ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" ESCAPE '\\'");
        if let Some(university) = &university {
            query.push(format!(" OR {university} ILIKE "));
            query.push_bind(pattern);
            query.push(" ESCAPE '\\'");
        }
        query.push(")");
    }
}
