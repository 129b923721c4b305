//! Scholarship search planning.
//!
//! This module decides *what* a scholarship search asks for; the repository
//! layer turns the plan into SQL. It owns:
//!
//! - [`ScholarshipFilter`], the optional filters accepted by the listing endpoint;
//! - [`SortOrder`] and the `ORDER BY` fragment for each order;
//! - [`ScholarshipColumns`], the physical column names of the `scholarships`
//!   table, resolved from schema introspection so that databases imported from
//!   older deployments (`application_deadline`, `academic_level`, ...) keep working;
//! - term sanitizing and `LIKE` pattern escaping for free-text search.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, DbId};

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of scholarships per page.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Maximum number of scholarships per page.
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Default number of featured scholarships on the home page.
pub const DEFAULT_FEATURED_LIMIT: i64 = 6;

/// Default number of related scholarships on a detail page.
pub const DEFAULT_RELATED_LIMIT: i64 = 4;

/// Maximum number of free-text terms honoured per query.
pub const MAX_SEARCH_TERMS: usize = 8;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Sort order
// ---------------------------------------------------------------------------

/// Result ordering for scholarship listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recently added first.
    #[default]
    Newest,
    /// Soonest deadline first; scholarships without a deadline last.
    Deadline,
    /// Largest amount first.
    AmountDesc,
    /// Smallest amount first.
    AmountAsc,
    /// Most viewed first.
    Popular,
    /// Alphabetical by title.
    Title,
}

impl FromStr for SortOrder {
    type Err = CoreError;

    /// Parse leniently: case-insensitive, `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "" | "newest" | "recent" => Ok(SortOrder::Newest),
            "deadline" => Ok(SortOrder::Deadline),
            "amount_desc" | "amount" => Ok(SortOrder::AmountDesc),
            "amount_asc" => Ok(SortOrder::AmountAsc),
            "popular" | "views" => Ok(SortOrder::Popular),
            "title" => Ok(SortOrder::Title),
            _ => Err(CoreError::Validation(format!(
                "Unknown sort order '{s}'. Must be one of: newest, deadline, \
                 amount_desc, amount_asc, popular, title"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Optional filters for `GET /api/v1/scholarships`.
///
/// Every supplied filter must match (AND semantics). Blank strings are
/// treated as absent; see [`ScholarshipFilter::normalized`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScholarshipFilter {
    /// Free-text query matched against title, description, university and country.
    pub q: Option<String>,
    pub country: Option<String>,
    pub field: Option<String>,
    pub level: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub featured: Option<bool>,
    pub university_id: Option<DbId>,
    /// Only scholarships whose deadline is on or after this date.
    pub deadline_after: Option<Date>,
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ScholarshipFilter {
    /// Return a copy with surrounding whitespace trimmed and blank strings
    /// turned into `None`.
    pub fn normalized(&self) -> Self {
        fn clean(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            q: clean(&self.q),
            country: clean(&self.country),
            field: clean(&self.field),
            level: clean(&self.level),
            sort: clean(&self.sort),
            ..self.clone()
        }
    }

    /// Validate amount bounds and the sort order.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in [("min_amount", self.min_amount), ("max_amount", self.max_amount)] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(CoreError::Validation(format!(
                        "{name} must be a non-negative number"
                    )));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.min_amount, self.max_amount) {
            if min > max {
                return Err(CoreError::Validation(format!(
                    "min_amount ({min}) must not exceed max_amount ({max})"
                )));
            }
        }
        self.sort_order()?;
        Ok(())
    }

    /// The requested sort order, defaulting to [`SortOrder::Newest`].
    pub fn sort_order(&self) -> Result<SortOrder, CoreError> {
        match self.sort.as_deref() {
            Some(s) => s.parse(),
            None => Ok(SortOrder::default()),
        }
    }

    /// Sanitized free-text terms (empty when `q` is absent or blank).
    pub fn terms(&self) -> Vec<String> {
        self.q.as_deref().map(search_terms).unwrap_or_default()
    }

    /// Effective page size.
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT)
    }

    /// Effective page offset.
    pub fn offset(&self) -> i64 {
        clamp_offset(self.offset)
    }

    /// `true` when no filter other than paging and sort is present.
    pub fn is_unfiltered(&self) -> bool {
        let clean = self.normalized();
        clean.terms().is_empty()
            && clean.country.is_none()
            && clean.field.is_none()
            && clean.level.is_none()
            && self.min_amount.is_none()
            && self.max_amount.is_none()
            && self.featured.is_none()
            && self.university_id.is_none()
            && self.deadline_after.is_none()
    }
}

// ---------------------------------------------------------------------------
// Free-text terms
// ---------------------------------------------------------------------------

/// Split user input into search terms.
///
/// - Splits on whitespace.
/// - Strips leading/trailing punctuation from each term (inner `-` and `'` survive).
/// - Lowercases, drops empty terms and duplicates, and keeps at most
///   [`MAX_SEARCH_TERMS`].
pub fn search_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for raw in query.split_whitespace() {
        let term = raw
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if term.is_empty() || terms.contains(&term) {
            continue;
        }
        terms.push(term);
        if terms.len() == MAX_SEARCH_TERMS {
            break;
        }
    }
    terms
}

/// Build an `ILIKE` pattern matching `term` anywhere, escaping `\`, `%` and `_`.
///
/// The resulting pattern must be used with `ESCAPE '\'`.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

// ---------------------------------------------------------------------------
// Column resolution
// ---------------------------------------------------------------------------

/// Accepted physical names for the deadline column, in order of preference.
pub const DEADLINE_VARIANTS: &[&str] = &["deadline", "application_deadline"];
/// Accepted physical names for the academic level column.
pub const LEVEL_VARIANTS: &[&str] = &["level", "academic_level", "degree_level"];
/// Accepted physical names for the field-of-study column.
pub const FIELD_VARIANTS: &[&str] = &["field", "field_of_study", "subject"];
/// Accepted physical names for the numeric amount column.
pub const AMOUNT_VARIANTS: &[&str] = &["amount_value", "amount_numeric"];
/// Accepted physical names for the denormalized university name column.
pub const UNIVERSITY_VARIANTS: &[&str] = &["university_name", "university"];
/// Accepted physical names for the featured flag.
pub const FEATURED_VARIANTS: &[&str] = &["is_featured", "featured"];

/// Physical column names of the `scholarships` table.
///
/// Every name is one of the `*_VARIANTS` constants, never user input, so the
/// names are safe to interpolate into SQL. Optional columns that do not exist
/// are `None` and are projected as typed `NULL` / `FALSE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScholarshipColumns {
    pub deadline: &'static str,
    pub level: &'static str,
    pub field: &'static str,
    pub amount_value: Option<&'static str>,
    pub university_name: Option<&'static str>,
    pub is_featured: Option<&'static str>,
}

impl Default for ScholarshipColumns {
    /// The canonical names created by the bundled migrations.
    fn default() -> Self {
        Self {
            deadline: "deadline",
            level: "level",
            field: "field",
            amount_value: Some("amount_value"),
            university_name: Some("university_name"),
            is_featured: Some("is_featured"),
        }
    }
}

impl ScholarshipColumns {
    /// Resolve column names from the columns actually present in the table.
    ///
    /// Fails when a required column (deadline, level, field) has no known variant.
    pub fn resolve<S: AsRef<str>>(present: &[S]) -> Result<Self, CoreError> {
        let pick = |variants: &[&'static str]| -> Option<&'static str> {
            variants
                .iter()
                .copied()
                .find(|v| present.iter().any(|p| p.as_ref().eq_ignore_ascii_case(v)))
        };
        let require = |name: &str, variants: &[&'static str]| {
            pick(variants).ok_or_else(|| {
                CoreError::Internal(format!(
                    "scholarships table has no {name} column (expected one of {variants:?})"
                ))
            })
        };

        Ok(Self {
            deadline: require("deadline", DEADLINE_VARIANTS)?,
            level: require("level", LEVEL_VARIANTS)?,
            field: require("field", FIELD_VARIANTS)?,
            amount_value: pick(AMOUNT_VARIANTS),
            university_name: pick(UNIVERSITY_VARIANTS),
            is_featured: pick(FEATURED_VARIANTS),
        })
    }

    /// SELECT list aliasing every variant to its canonical name.
    ///
    /// Assumes the table is aliased `s` and `scholarship_views` is `v`.
    pub fn select_list(&self) -> String {
        let amount = self
            .amount_value
            .map(|c| format!("s.{c}::DOUBLE PRECISION"))
            .unwrap_or_else(|| "NULL::DOUBLE PRECISION".into());
        let university = self
            .university_name
            .map(|c| format!("s.{c}"))
            .unwrap_or_else(|| "NULL::TEXT".into());
        let featured = self
            .is_featured
            .map(|c| format!("s.{c}"))
            .unwrap_or_else(|| "FALSE".into());

        format!(
            "s.id, s.title, s.university_id, {university} AS university_name, s.country, \
             s.amount, {amount} AS amount_value, s.currency, s.{deadline} AS deadline, \
             s.{level} AS level, s.{field} AS field, s.description, s.eligibility, \
             s.benefits, s.application_process, s.website, s.source_id, \
             {featured} AS is_featured, COALESCE(v.view_count, 0)::BIGINT AS view_count, \
             s.created_at, s.updated_at",
            deadline = self.deadline,
            level = self.level,
            field = self.field,
        )
    }

    /// Qualified expression for the numeric amount, if the table has one.
    pub fn amount_expr(&self) -> Option<String> {
        self.amount_value.map(|c| format!("s.{c}"))
    }

    /// Qualified expression for the university name, if the table has one.
    pub fn university_expr(&self) -> Option<String> {
        self.university_name.map(|c| format!("s.{c}"))
    }

    /// `ORDER BY` body (without the keyword) for the given sort order.
    ///
    /// Always ends with `s.id DESC` so paging is deterministic. Amount sorts
    /// fall back to newest-first when the table has no numeric amount column.
    pub fn order_by(&self, sort: SortOrder) -> String {
        match (sort, self.amount_value) {
            (SortOrder::Newest, _) | (SortOrder::AmountAsc | SortOrder::AmountDesc, None) => {
                "s.created_at DESC, s.id DESC".to_string()
            }
            (SortOrder::Deadline, _) => format!("s.{} ASC NULLS LAST, s.id DESC", self.deadline),
            (SortOrder::AmountDesc, Some(c)) => format!("s.{c} DESC NULLS LAST, s.id DESC"),
            (SortOrder::AmountAsc, Some(c)) => format!("s.{c} ASC NULLS LAST, s.id DESC"),
            (SortOrder::Popular, _) => "COALESCE(v.view_count, 0) DESC, s.id DESC".to_string(),
            (SortOrder::Title, _) => "s.title ASC, s.id DESC".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -- sort order ----------------------------------------------------------

    #[test]
    fn sort_order_parses_leniently() {
        assert_eq!("Deadline".parse::<SortOrder>().unwrap(), SortOrder::Deadline);
        assert_eq!("amount-desc".parse::<SortOrder>().unwrap(), SortOrder::AmountDesc);
        assert_eq!("AMOUNT_ASC".parse::<SortOrder>().unwrap(), SortOrder::AmountAsc);
        assert_eq!("views".parse::<SortOrder>().unwrap(), SortOrder::Popular);
        assert_eq!("".parse::<SortOrder>().unwrap(), SortOrder::Newest);
    }

    #[test]
    fn unknown_sort_order_is_validation_error() {
        assert_matches!("cheapest".parse::<SortOrder>(), Err(CoreError::Validation(_)));
    }

    // -- filter --------------------------------------------------------------

    #[test]
    fn normalized_drops_blank_strings() {
        let filter = ScholarshipFilter {
            q: Some("   ".into()),
            country: Some(" Germany ".into()),
            field: Some(String::new()),
            ..Default::default()
        }
        .normalized();

        assert_eq!(filter.q, None);
        assert_eq!(filter.country.as_deref(), Some("Germany"));
        assert_eq!(filter.field, None);
    }

    #[test]
    fn validate_rejects_inverted_amount_range() {
        let filter = ScholarshipFilter {
            min_amount: Some(5000.0),
            max_amount: Some(1000.0),
            ..Default::default()
        };
        assert_matches!(filter.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn validate_rejects_negative_amount() {
        let filter = ScholarshipFilter {
            min_amount: Some(-1.0),
            ..Default::default()
        };
        assert!(filter.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_sort() {
        let filter = ScholarshipFilter {
            sort: Some("random".into()),
            ..Default::default()
        };
        assert!(filter.validate().is_err());
    }

    #[test]
    fn unfiltered_ignores_paging_and_sort() {
        let filter = ScholarshipFilter {
            sort: Some("deadline".into()),
            limit: Some(5),
            offset: Some(10),
            q: Some("  ".into()),
            ..Default::default()
        };
        assert!(filter.is_unfiltered());

        let filter = ScholarshipFilter {
            featured: Some(true),
            ..Default::default()
        };
        assert!(!filter.is_unfiltered());
    }

    #[test]
    fn limit_and_offset_are_clamped() {
        let filter = ScholarshipFilter {
            limit: Some(1000),
            offset: Some(-3),
            ..Default::default()
        };
        assert_eq!(filter.limit(), MAX_SEARCH_LIMIT);
        assert_eq!(filter.offset(), 0);
        assert_eq!(ScholarshipFilter::default().limit(), DEFAULT_SEARCH_LIMIT);
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
    }

    // -- terms ---------------------------------------------------------------

    #[test]
    fn search_terms_strip_punctuation_and_dedupe() {
        assert_eq!(
            search_terms("  Computer, SCIENCE! computer  "),
            vec!["computer".to_string(), "science".to_string()]
        );
        assert_eq!(search_terms("\"master's\""), vec!["master's".to_string()]);
        assert!(search_terms(" ?! ").is_empty());
    }

    #[test]
    fn search_terms_are_capped() {
        let many = (0..20).map(|i| format!("t{i}")).collect::<Vec<_>>().join(" ");
        assert_eq!(search_terms(&many).len(), MAX_SEARCH_TERMS);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("data"), "%data%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    // -- columns -------------------------------------------------------------

    #[test]
    fn resolve_canonical_columns() {
        let present = [
            "id", "title", "deadline", "level", "field", "amount_value",
            "university_name", "is_featured",
        ];
        assert_eq!(
            ScholarshipColumns::resolve(&present).unwrap(),
            ScholarshipColumns::default()
        );
    }

    #[test]
    fn resolve_legacy_variants() {
        let present = vec![
            "id".to_string(),
            "application_deadline".to_string(),
            "academic_level".to_string(),
            "field_of_study".to_string(),
            "university".to_string(),
            "featured".to_string(),
        ];
        let cols = ScholarshipColumns::resolve(&present).unwrap();
        assert_eq!(cols.deadline, "application_deadline");
        assert_eq!(cols.level, "academic_level");
        assert_eq!(cols.field, "field_of_study");
        assert_eq!(cols.amount_value, None);
        assert_eq!(cols.university_name, Some("university"));
        assert_eq!(cols.is_featured, Some("featured"));
    }

    #[test]
    fn resolve_fails_without_required_column() {
        let present = ["id", "deadline", "level"];
        assert_matches!(
            ScholarshipColumns::resolve(&present),
            Err(CoreError::Internal(msg)) if msg.contains("field")
        );
    }

    #[test]
    fn select_list_projects_missing_columns_as_typed_nulls() {
        let cols = ScholarshipColumns {
            amount_value: None,
            university_name: None,
            is_featured: None,
            ..ScholarshipColumns::default()
        };
        let select = cols.select_list();
        assert!(select.contains("NULL::DOUBLE PRECISION AS amount_value"));
        assert!(select.contains("NULL::TEXT AS university_name"));
        assert!(select.contains("FALSE AS is_featured"));
    }

    #[test]
    fn order_by_always_has_id_tiebreaker() {
        let cols = ScholarshipColumns::default();
        for sort in [
            SortOrder::Newest,
            SortOrder::Deadline,
            SortOrder::AmountDesc,
            SortOrder::AmountAsc,
            SortOrder::Popular,
            SortOrder::Title,
        ] {
            assert!(cols.order_by(sort).ends_with("s.id DESC"), "{sort:?}");
        }
    }

    #[test]
    fn amount_sort_degrades_without_amount_column() {
        let cols = ScholarshipColumns {
            amount_value: None,
            ..ScholarshipColumns::default()
        };
        assert_eq!(
            cols.order_by(SortOrder::AmountDesc),
            cols.order_by(SortOrder::Newest)
        );
    }

    #[test]
    fn deadline_sort_uses_resolved_column() {
        let cols = ScholarshipColumns {
            deadline: "application_deadline",
            ..ScholarshipColumns::default()
        };
        assert_eq!(
            cols.order_by(SortOrder::Deadline),
            "s.application_deadline ASC NULLS LAST, s.id DESC"
        );
    }
}
