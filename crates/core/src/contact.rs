//! Contact message statuses and validation.

use crate::error::CoreError;
use crate::validation::{validate_email, validate_required};

pub const STATUS_NEW: &str = "new";
pub const STATUS_READ: &str = "read";
pub const STATUS_REPLIED: &str = "replied";
pub const STATUS_ARCHIVED: &str = "archived";

pub const VALID_STATUSES: &[&str] = &[STATUS_NEW, STATUS_READ, STATUS_REPLIED, STATUS_ARCHIVED];

pub const MAX_NAME_LENGTH: usize = 120;
pub const MAX_SUBJECT_LENGTH: usize = 200;
pub const MAX_BODY_LENGTH: usize = 5_000;

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid contact message status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// Validate a public contact-form submission.
pub fn validate_contact(name: &str, email: &str, subject: &str, body: &str) -> Result<(), CoreError> {
    validate_required("Name", name, MAX_NAME_LENGTH)?;
    validate_email(email)?;
    validate_required("Subject", subject, MAX_SUBJECT_LENGTH)?;
    validate_required("Message", body, MAX_BODY_LENGTH)?;
    Ok(())
}
