//! Upload validation functions

/// Extension of a file name, lowercased, without the dot
pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Membership check against an extension allow-list
pub fn validate_extension(filename: &str, allowed: &[&str]) -> Result<(), String> {
    let accepted = file_extension(filename)
        .map(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)))
        .unwrap_or(false);

    if accepted {
        Ok(())
    } else {
        Err(format!(
            "File does not have an approved extension: {}",
            allowed.join(", ")
        ))
    }
}
