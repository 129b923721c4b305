//! Static fallback catalogue.
//!
//! When the database is unreachable, or the `scholarships` table is empty,
//! the listing endpoint serves this small hard-coded set instead of failing.
//! Fallback ids are negative so they can never collide with database ids.

use chrono::NaiveDate;

use crate::search::{ScholarshipFilter, SortOrder};
use crate::types::DbId;

/// A hard-coded scholarship served when the database cannot be used.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackScholarship {
    pub id: DbId,
    pub title: &'static str,
    pub university_name: Option<&'static str>,
    pub country: &'static str,
    pub amount: &'static str,
    pub amount_value: Option<f64>,
    pub currency: &'static str,
    pub deadline: Option<NaiveDate>,
    pub level: &'static str,
    pub field: &'static str,
    pub description: &'static str,
    pub eligibility: &'static [&'static str],
    pub benefits: &'static [&'static str],
    pub application_process: &'static [&'static str],
    pub website: &'static str,
    pub is_featured: bool,
}

/// Result of filtering the fallback catalogue: one page plus the total match count.
#[derive(Debug, Clone)]
pub struct FallbackPage {
    pub items: Vec<FallbackScholarship>,
    pub total: i64,
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// The full fallback catalogue in insertion order (newest last).
pub fn fallback_scholarships() -> Vec<FallbackScholarship> {
    vec![
        FallbackScholarship {
            id: -1,
            title: "Fulbright Foreign Student Program",
            university_name: None,
            country: "United States",
            amount: "Full funding",
            amount_value: Some(40_000.0),
            currency: "USD",
            deadline: date(2026, 10, 15),
            level: "Master",
            field: "Any",
            description: "Graduate study and research in the United States for \
                          international students and young professionals.",
            eligibility: &["Bachelor's degree", "English proficiency", "Non-US citizen"],
            benefits: &["Tuition", "Living stipend", "Airfare", "Health insurance"],
            application_process: &[
                "Apply through the Fulbright commission in your country",
                "Interview",
            ],
            website: "https://foreign.fulbrightonline.org/",
            is_featured: true,
        },
        FallbackScholarship {
            id: -2,
            title: "Chevening Scholarships",
            university_name: None,
            country: "United Kingdom",
            amount: "Full funding",
            amount_value: Some(35_000.0),
            currency: "GBP",
            deadline: date(2026, 11, 5),
            level: "Master",
            field: "Any",
            description: "UK government scholarships for one-year master's degrees \
                          for future leaders.",
            eligibility: &["Two years of work experience", "Return home for two years"],
            benefits: &["Tuition", "Monthly stipend", "Travel costs"],
            application_process: &["Online application", "Interview at the British embassy"],
            website: "https://www.chevening.org/",
            is_featured: true,
        },
        FallbackScholarship {
            id: -3,
            title: "DAAD Study Scholarships for Graduates",
            university_name: None,
            country: "Germany",
            amount: "EUR 992 per month",
            amount_value: Some(11_904.0),
            currency: "EUR",
            deadline: date(2026, 10, 31),
            level: "Master",
            field: "Engineering",
            description: "Scholarships for foreign graduates to complete a postgraduate \
                          degree at a German university.",
            eligibility: &["Bachelor's degree completed within six years"],
            benefits: &["Monthly stipend", "Travel allowance", "Health insurance"],
            application_process: &["Apply via the DAAD portal"],
            website: "https://www.daad.de/en/",
            is_featured: false,
        },
        FallbackScholarship {
            id: -4,
            title: "Erasmus Mundus Joint Masters",
            university_name: None,
            country: "European Union",
            amount: "Up to EUR 1,400 per month",
            amount_value: Some(16_800.0),
            currency: "EUR",
            deadline: date(2027, 1, 15),
            level: "Master",
            field: "Any",
            description: "Integrated master's programmes delivered by consortia of \
                          European universities.",
            eligibility: &["Bachelor's degree"],
            benefits: &["Participation costs", "Monthly allowance"],
            application_process: &["Apply directly to the programme consortium"],
            website: "https://www.eacea.ec.europa.eu/scholarships/erasmus-mundus-catalogue_en",
            is_featured: false,
        },
        FallbackScholarship {
            id: -5,
            title: "Gates Cambridge Scholarship",
            university_name: Some("University of Cambridge"),
            country: "United Kingdom",
            amount: "Full cost of study",
            amount_value: Some(50_000.0),
            currency: "GBP",
            deadline: date(2026, 12, 3),
            level: "PhD",
            field: "Any",
            description: "Full-cost scholarships for outstanding applicants from outside \
                          the UK to pursue a postgraduate degree at Cambridge.",
            eligibility: &["Non-UK citizen", "Admission to a Cambridge programme"],
            benefits: &["University fees", "Maintenance allowance", "Airfare"],
            application_process: &["Apply with the Cambridge graduate application"],
            website: "https://www.gatescambridge.org/",
            is_featured: true,
        },
        FallbackScholarship {
            id: -6,
            title: "Rhodes Scholarship",
            university_name: Some("University of Oxford"),
            country: "United Kingdom",
            amount: "Full funding",
            amount_value: Some(45_000.0),
            currency: "GBP",
            deadline: None,
            level: "PhD",
            field: "Any",
            description: "Postgraduate awards supporting exceptional students from around \
                          the world to study at Oxford.",
            eligibility: &["Age 19 to 25", "Academic excellence"],
            benefits: &["University fees", "Stipend", "Flights"],
            application_process: &["Country-specific online application"],
            website: "https://www.rhodeshouse.ox.ac.uk/",
            is_featured: false,
        },
    ]
}

/// Look up a single fallback scholarship by its (negative) id.
pub fn find_fallback(id: DbId) -> Option<FallbackScholarship> {
    fallback_scholarships().into_iter().find(|s| s.id == id)
}

impl FallbackScholarship {
    /// Whether this scholarship satisfies every supplied filter.
    ///
    /// Mirrors the SQL search: case-insensitive equality on country, field and
    /// level; amount and deadline bounds exclude rows without a value; every
    /// free-text term must appear in the title, description, university or country.
    pub fn matches(&self, filter: &ScholarshipFilter) -> bool {
        let eq = |wanted: &Option<String>, actual: &str| {
            wanted
                .as_deref()
                .map_or(true, |w| w.eq_ignore_ascii_case(actual))
        };

        if !eq(&filter.country, self.country)
            || !eq(&filter.field, self.field)
            || !eq(&filter.level, self.level)
        {
            return false;
        }
        if let Some(min) = filter.min_amount {
            if !self.amount_value.is_some_and(|v| v >= min) {
                return false;
            }
        }
        if let Some(max) = filter.max_amount {
            if !self.amount_value.is_some_and(|v| v <= max) {
                return false;
            }
        }
        if let Some(featured) = filter.featured {
            if self.is_featured != featured {
                return false;
            }
        }
        if filter.university_id.is_some() {
            return false;
        }
        if let Some(after) = filter.deadline_after {
            if !self.deadline.is_some_and(|d| d >= after) {
                return false;
            }
        }

        let haystack = format!(
            "{} {} {} {}",
            self.title,
            self.description,
            self.university_name.unwrap_or_default(),
            self.country
        )
        .to_lowercase();
        filter.terms().iter().all(|t| haystack.contains(t.as_str()))
    }
}

/// Filter, sort and page the fallback catalogue with the same semantics as
/// the database search.
pub fn apply_filter(filter: &ScholarshipFilter) -> FallbackPage {
    let filter = filter.normalized();
    let sort = filter.sort_order().unwrap_or_default();

    let mut matched: Vec<FallbackScholarship> = fallback_scholarships()
        .into_iter()
        .filter(|s| s.matches(&filter))
        .collect();

    // Ids are negative and decrease with insertion order, so "newest" means
    // the most negative id first; the id tiebreaker follows the same rule.
    let by_newest = |a: &FallbackScholarship, b: &FallbackScholarship| a.id.cmp(&b.id);
    match sort {
        SortOrder::Newest | SortOrder::Popular => matched.sort_by(by_newest),
        SortOrder::Deadline => matched.sort_by(|a, b| match (a.deadline, b.deadline) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| by_newest(a, b)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => by_newest(a, b),
        }),
        SortOrder::AmountDesc => matched.sort_by(|a, b| {
            b.amount_value
                .partial_cmp(&a.amount_value)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| by_newest(a, b))
        }),
        SortOrder::AmountAsc => matched.sort_by(|a, b| {
            a.amount_value
                .partial_cmp(&b.amount_value)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| by_newest(a, b))
        }),
        SortOrder::Title => {
            matched.sort_by(|a, b| a.title.cmp(b.title).then_with(|| by_newest(a, b)))
        }
    }

    let total = matched.len() as i64;
    let items = matched
        .into_iter()
        .skip(filter.offset() as usize)
        .take(filter.limit() as usize)
        .collect();

    FallbackPage { items, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_ids_are_negative_and_unique() {
        let all = fallback_scholarships();
        assert!(all.iter().all(|s| s.id < 0));
        let mut ids: Vec<_> = all.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn unfiltered_returns_everything() {
        let page = apply_filter(&ScholarshipFilter::default());
        assert_eq!(page.total, fallback_scholarships().len() as i64);
        assert_eq!(page.items.len(), fallback_scholarships().len());
    }

    #[test]
    fn country_filter_is_case_insensitive() {
        let filter = ScholarshipFilter {
            country: Some("united kingdom".into()),
            ..Default::default()
        };
        let page = apply_filter(&filter);
        assert_eq!(page.total, 3);
        assert!(page.items.iter().all(|s| s.country == "United Kingdom"));
    }

    #[test]
    fn every_filter_must_match() {
        let filter = ScholarshipFilter {
            country: Some("United Kingdom".into()),
            level: Some("PhD".into()),
            min_amount: Some(48_000.0),
            ..Default::default()
        };
        let page = apply_filter(&filter);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Gates Cambridge Scholarship");
    }

    #[test]
    fn text_terms_are_anded() {
        let filter = ScholarshipFilter {
            q: Some("german university".into()),
            ..Default::default()
        };
        let page = apply_filter(&filter);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, -3);

        let filter = ScholarshipFilter {
            q: Some("german oxford".into()),
            ..Default::default()
        };
        assert_eq!(apply_filter(&filter).total, 0);
    }

    #[test]
    fn deadline_sort_puts_missing_deadlines_last() {
        let filter = ScholarshipFilter {
            sort: Some("deadline".into()),
            ..Default::default()
        };
        let page = apply_filter(&filter);
        assert_eq!(page.items.first().map(|s| s.id), Some(-1));
        assert_eq!(page.items.last().and_then(|s| s.deadline), None);
    }

    #[test]
    fn amount_desc_sort() {
        let filter = ScholarshipFilter {
            sort: Some("amount_desc".into()),
            ..Default::default()
        };
        let page = apply_filter(&filter);
        assert_eq!(page.items[0].title, "Gates Cambridge Scholarship");
    }

    #[test]
    fn paging_keeps_total() {
        let filter = ScholarshipFilter {
            limit: Some(2),
            offset: Some(4),
            ..Default::default()
        };
        let page = apply_filter(&filter);
        assert_eq!(page.total, 6);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn university_filter_never_matches_fallback() {
        let filter = ScholarshipFilter {
            university_id: Some(1),
            ..Default::default()
        };
        assert_eq!(apply_filter(&filter).total, 0);
    }

    #[test]
    fn find_by_id() {
        assert_eq!(find_fallback(-2).map(|s| s.title), Some("Chevening Scholarships"));
        assert!(find_fallback(7).is_none());
    }
}
