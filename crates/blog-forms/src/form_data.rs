// File: src/form_data.rs
// Purpose: Submitted key/value payload handed to a form schema

use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// A file posted with the form
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FileUpload {
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Form data from POST/PUT requests
///
/// Values are kept exactly as submitted; blank handling belongs to the
/// presence validator so that passwords are never altered.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, FileUpload>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from already-parsed form fields
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self {
            fields,
            files: HashMap::new(),
        }
    }

    /// Create from a JSON object; non-string scalars are stringified
    pub fn from_json(json: &JsonValue) -> Self {
        let mut fields = HashMap::new();

        if let JsonValue::Object(map) = json {
            for (key, value) in map {
                match value {
                    JsonValue::String(s) => {
                        fields.insert(key.clone(), s.clone());
                    }
                    JsonValue::Null => {}
                    other => {
                        fields.insert(key.clone(), other.to_string());
                    }
                }
            }
        }

        Self::from_fields(fields)
    }

    /// Builder-style insert of a text value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style insert of an uploaded file
    pub fn with_file(mut self, key: impl Into<String>, file: FileUpload) -> Self {
        self.files.insert(key.into(), file);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Get a form field value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Get an uploaded file
    pub fn file(&self, key: &str) -> Option<&FileUpload> {
        self.files.get(key)
    }

    /// Check if a field or file exists
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key) || self.files.contains_key(key)
    }

    /// Get all field names
    pub fn keys(&self) -> Vec<&String> {
        self.fields.keys().chain(self.files.keys()).collect()
    }

    /// Check if form is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.files.is_empty()
    }
}
