//! Scholarship field validation for the admin back-office.

use crate::error::CoreError;
use crate::validation::{validate_required, validate_url};

/// Maximum length of a scholarship title (characters).
pub const MAX_TITLE_LENGTH: usize = 300;

/// Maximum length of a scholarship description (characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 20_000;

/// Maximum number of entries in eligibility / benefits / application-process lists.
pub const MAX_LIST_ITEMS: usize = 50;

/// Maximum length of a single list entry (characters).
pub const MAX_LIST_ITEM_LENGTH: usize = 1_000;

/// Default currency when none is supplied.
pub const DEFAULT_CURRENCY: &str = "USD";

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_required("Title", title, MAX_TITLE_LENGTH)
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

pub fn validate_website(website: &str) -> Result<(), CoreError> {
    validate_url("Website", website)
}

/// Validate an eligibility / benefits / application-process list.
pub fn validate_list_items(field: &str, items: &[String]) -> Result<(), CoreError> {
    if items.len() > MAX_LIST_ITEMS {
        return Err(CoreError::Validation(format!(
            "{field} may contain at most {MAX_LIST_ITEMS} entries (got {})",
            items.len()
        )));
    }
    for (i, item) in items.iter().enumerate() {
        if item.trim().is_empty() {
            return Err(CoreError::Validation(format!("{field} entry {} is empty", i + 1)));
        }
        if item.chars().count() > MAX_LIST_ITEM_LENGTH {
            return Err(CoreError::Validation(format!(
                "{field} entry {} exceeds {MAX_LIST_ITEM_LENGTH} characters",
                i + 1
            )));
        }
    }
    Ok(())
}

pub fn validate_amount_value(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(CoreError::Validation(
            "amount_value must be a non-negative number".into(),
        ));
    }
    Ok(())
}

/// Validate a three-letter ISO 4217 currency code.
pub fn validate_currency(currency: &str) -> Result<(), CoreError> {
    if currency.len() == 3 && currency.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Currency '{currency}' must be a three-letter uppercase ISO code"
        )))
    }
}

/// Trim list entries and drop blank ones. Used before validation on writes so
/// that trailing empty rows from the admin form are ignored.
pub fn clean_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_bounds() {
        assert!(validate_title("DAAD Scholarship").is_ok());
        assert!(validate_title("  ").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn description_limit() {
        assert!(validate_description(&"d".repeat(MAX_DESCRIPTION_LENGTH)).is_ok());
        assert!(validate_description(&"d".repeat(MAX_DESCRIPTION_LENGTH + 1)).is_err());
    }

    #[test]
    fn list_items_reject_blank_entries() {
        let items = vec!["GPA 3.5".to_string(), " ".to_string()];
        let err = validate_list_items("Eligibility", &items).unwrap_err();
        assert!(err.to_string().contains("entry 2"));
    }

    #[test]
    fn list_items_reject_too_many() {
        let items = vec!["x".to_string(); MAX_LIST_ITEMS + 1];
        assert!(validate_list_items("Benefits", &items).is_err());
    }

    #[test]
    fn clean_list_drops_blank_rows() {
        let items = vec![" Tuition ".to_string(), String::new(), "Stipend".to_string()];
        assert_eq!(clean_list(&items), vec!["Tuition", "Stipend"]);
    }

    #[test]
    fn amount_must_be_non_negative() {
        assert!(validate_amount_value(0.0).is_ok());
        assert!(validate_amount_value(-5.0).is_err());
        assert!(validate_amount_value(f64::NAN).is_err());
    }

    #[test]
    fn currency_codes() {
        assert!(validate_currency("EUR").is_ok());
        assert!(validate_currency("eur").is_err());
        assert!(validate_currency("EURO").is_err());
    }
}
