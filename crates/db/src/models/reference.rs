//! Reference (lookup) tables: countries, fields of study, academic levels and
//! scholarship sources.
//!
//! All four tables share the shape `(id, name, <detail>)`; the detail column
//! differs per table and is projected as `detail`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use scholarhub_core::error::CoreError;
use scholarhub_core::types::{DbId, Timestamp};

/// Which reference table an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Countries,
    Fields,
    Levels,
    Sources,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 4] = [
        ReferenceKind::Countries,
        ReferenceKind::Fields,
        ReferenceKind::Levels,
        ReferenceKind::Sources,
    ];

    /// Physical table name.
    pub fn table(self) -> &'static str {
        match self {
            ReferenceKind::Countries => "countries",
            ReferenceKind::Fields => "fields_of_study",
            ReferenceKind::Levels => "academic_levels",
            ReferenceKind::Sources => "scholarship_sources",
        }
    }

    /// Column projected as `detail`, if the table has one.
    pub fn detail_column(self) -> Option<&'static str> {
        match self {
            ReferenceKind::Countries => Some("code"),
            ReferenceKind::Sources => Some("website"),
            ReferenceKind::Fields | ReferenceKind::Levels => None,
        }
    }

    /// `ORDER BY` body for listings.
    pub fn order_by(self) -> &'static str {
        match self {
            ReferenceKind::Levels => "sort_order, name",
            _ => "name",
        }
    }

    /// Entity name used in not-found errors.
    pub fn entity(self) -> &'static str {
        match self {
            ReferenceKind::Countries => "Country",
            ReferenceKind::Fields => "FieldOfStudy",
            ReferenceKind::Levels => "AcademicLevel",
            ReferenceKind::Sources => "ScholarshipSource",
        }
    }
}

impl FromStr for ReferenceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "countries" => Ok(ReferenceKind::Countries),
            "fields" => Ok(ReferenceKind::Fields),
            "levels" => Ok(ReferenceKind::Levels),
            "sources" => Ok(ReferenceKind::Sources),
            other => Err(CoreError::Validation(format!(
                "Unknown reference kind '{other}'. Must be one of: countries, fields, levels, sources"
            ))),
        }
    }
}

/// A row from any reference table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReferenceItem {
    pub id: DbId,
    pub name: String,
    /// Country code, source website, or `None`.
    pub detail: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a reference item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReferenceItem {
    pub name: String,
    pub detail: Option<String>,
    /// Only meaningful for academic levels.
    pub sort_order: Option<i32>,
}
