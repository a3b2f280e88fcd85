//! Email validation functions

/// Message used when an address is not well formed
pub const INVALID_EMAIL: &str = "Invalid email address.";

/// Validates basic email format
///
/// Checks for:
/// - Contains exactly one '@' symbol
/// - Has content before and after '@'
/// - Has at least one '.' in domain part
/// - Minimum length requirements
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 3 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    // Must have exactly one @ symbol
    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || domain.len() > 255 {
        return false;
    }

    if !domain.contains('.') {
        return false;
    }

    // Domain can't start or end with dot or hyphen
    if domain.starts_with('.') || domain.ends_with('.')
        || domain.starts_with('-') || domain.ends_with('-') {
        return false;
    }

    if domain.contains("..") || local.starts_with('.') || local.ends_with('.') {
        return false;
    }

    let valid_local_chars = |c: char| {
        c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | '+' | '\'' | '%')
    };

    if !local.chars().all(valid_local_chars) {
        return false;
    }

    let valid_domain_chars = |c: char| c.is_alphanumeric() || c == '.' || c == '-';

    if !domain.chars().all(valid_domain_chars) {
        return false;
    }

    // TLD must be at least 2 characters
    match domain.rsplit_once('.') {
        Some((_, tld)) => tld.chars().count() >= 2,
        None => false,
    }
}

/// Email shape validator with the form message. Surrounding whitespace is
/// not stripped, so a padded address fails here instead of slipping past
/// lookups that compare the raw value.
pub fn validate_email(value: &str) -> Result<(), String> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(INVALID_EMAIL.to_string())
    }
}
