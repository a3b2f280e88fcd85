// File: src/validation/mod.rs
// Purpose: Field validators and the error map handed back on rejection

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub mod validators;

pub use validators::{run_field_chain, Validator};

/// A single failed check, attached to one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Field name to error messages. Fields are kept sorted by name so reports
/// come out the same on every run; messages keep the order the checks ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.entry(error.field).or_default().push(error.message);
    }

    /// Record several messages for one field; empty input leaves no entry
    pub fn extend_field(&mut self, field: &str, messages: impl IntoIterator<Item = String>) {
        for message in messages {
            self.push(ValidationError::new(field, message));
        }
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with at least one error
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Get first error for a specific field
    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|errors| errors.first())
            .map(String::as_str)
    }

    /// Get all errors for a specific field
    pub fn get_errors(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// Names of the fields that failed, sorted
    pub fn fields(&self) -> Vec<&str> {
        self.errors.keys().map(String::as_str).collect()
    }

    /// Flatten into individual errors, sorted by field
    pub fn to_errors(&self) -> Vec<ValidationError> {
        self.fields()
            .into_iter()
            .flat_map(|field| {
                self.errors[field]
                    .iter()
                    .map(move |message| ValidationError::new(field, message.clone()))
            })
            .collect()
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

impl From<BTreeMap<String, Vec<String>>> for FieldErrors {
    fn from(errors: BTreeMap<String, Vec<String>>) -> Self {
        let errors = errors.into_iter().filter(|(_, v)| !v.is_empty()).collect();
        Self { errors }
    }
}
