//! Application tracker rules.
//!
//! Defines the valid application statuses and transitions, plus the document
//! types and statuses used by the per-application checklist.

use crate::error::CoreError;
use crate::validation::validate_required;

// ---------------------------------------------------------------------------
// Application statuses
// ---------------------------------------------------------------------------

/// Initial status: the user is collecting information.
pub const STATUS_PLANNING: &str = "planning";
/// The user is actively preparing the application.
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// The application has been sent to the provider.
pub const STATUS_SUBMITTED: &str = "submitted";
/// The provider awarded the scholarship.
pub const STATUS_ACCEPTED: &str = "accepted";
/// The provider declined the application.
pub const STATUS_REJECTED: &str = "rejected";
/// The user abandoned or retracted the application.
pub const STATUS_WITHDRAWN: &str = "withdrawn";

/// All valid application statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PLANNING,
    STATUS_IN_PROGRESS,
    STATUS_SUBMITTED,
    STATUS_ACCEPTED,
    STATUS_REJECTED,
    STATUS_WITHDRAWN,
];

/// Returns the set of statuses that `from_status` may transition to.
///
/// - `planning`    -> `in_progress`, `submitted`, `withdrawn`
/// - `in_progress` -> `submitted`, `withdrawn`, `planning`
/// - `submitted`   -> `accepted`, `rejected`, `withdrawn`
/// - `withdrawn`   -> `planning`
/// - `accepted`, `rejected` are terminal
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_PLANNING => &[STATUS_IN_PROGRESS, STATUS_SUBMITTED, STATUS_WITHDRAWN],
        STATUS_IN_PROGRESS => &[STATUS_SUBMITTED, STATUS_WITHDRAWN, STATUS_PLANNING],
        STATUS_SUBMITTED => &[STATUS_ACCEPTED, STATUS_REJECTED, STATUS_WITHDRAWN],
        STATUS_WITHDRAWN => &[STATUS_PLANNING],
        _ => &[],
    }
}

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid application status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// Validate a status change. Re-setting the current status is a no-op and allowed.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    validate_status(next)?;
    if current == next || valid_transitions(current).contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot move application from '{current}' to '{next}'. Allowed: {:?}",
            valid_transitions(current)
        )))
    }
}

/// Whether moving into `status` should stamp `submitted_at`.
pub fn stamps_submission(status: &str) -> bool {
    status == STATUS_SUBMITTED
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

pub const MAX_TASK_TITLE_LENGTH: usize = 200;

/// Maximum length of free-form application notes.
pub const MAX_NOTES_LENGTH: usize = 10_000;

pub fn validate_task_title(title: &str) -> Result<(), CoreError> {
    validate_required("Task title", title, MAX_TASK_TITLE_LENGTH)
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

pub const DOCUMENT_TYPES: &[&str] = &[
    "transcript",
    "cv",
    "recommendation",
    "essay",
    "certificate",
    "passport",
    "other",
];

pub const DOCUMENT_STATUS_MISSING: &str = "missing";
pub const DOCUMENT_STATUSES: &[&str] = &[DOCUMENT_STATUS_MISSING, "draft", "ready", "uploaded"];

pub const MAX_DOCUMENT_NAME_LENGTH: usize = 200;

pub fn validate_document_type(document_type: &str) -> Result<(), CoreError> {
    if DOCUMENT_TYPES.contains(&document_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid document type '{document_type}'. Must be one of: {DOCUMENT_TYPES:?}"
        )))
    }
}

pub fn validate_document_status(status: &str) -> Result<(), CoreError> {
    if DOCUMENT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid document status '{status}'. Must be one of: {DOCUMENT_STATUSES:?}"
        )))
    }
}

pub fn validate_document_name(name: &str) -> Result<(), CoreError> {
    validate_required("Document name", name, MAX_DOCUMENT_NAME_LENGTH)
}
