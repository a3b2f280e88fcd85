//! String validation functions
//!
//! Lengths are counted in characters, not bytes, and both bounds are inclusive.

/// Message used when a required value is missing or blank
pub const REQUIRED: &str = "This field is required.";

/// Presence check: the value must contain something other than whitespace
pub fn validate_required(s: &str) -> Result<(), String> {
    if s.trim().is_empty() {
        Err(REQUIRED.to_string())
    } else {
        Ok(())
    }
}

/// Validates string length against optional inclusive bounds
pub fn validate_length(s: &str, min: Option<usize>, max: Option<usize>) -> Result<(), String> {
    let len = s.chars().count();
    let too_short = min.is_some_and(|min| len < min);
    let too_long = max.is_some_and(|max| len > max);

    if !too_short && !too_long {
        return Ok(());
    }

    Err(length_message(min, max))
}

/// Message for a failed length check
pub fn length_message(min: Option<usize>, max: Option<usize>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => {
            format!("Field must be between {} and {} characters long.", min, max)
        }
        (Some(min), None) => {
            let unit = if min == 1 { "character" } else { "characters" };
            format!("Field must be at least {} {} long.", min, unit)
        }
        (None, Some(max)) => format!("Field cannot be longer than {} characters.", max),
        (None, None) => String::new(),
    }
}

/// Equality validator: the value must match the other field exactly
pub fn validate_equals(value: &str, other_value: &str, other_name: &str) -> Result<(), String> {
    if value == other_value {
        Ok(())
    } else {
        Err(format!("Field must be equal to {}.", other_name))
    }
}
