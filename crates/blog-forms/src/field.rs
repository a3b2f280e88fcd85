// File: src/field.rs
// Purpose: Field declarations and the values bound to them

use crate::form_data::{FileUpload, FormData};
use crate::store::RecordId;
use crate::validation::Validator;
use serde::Serialize;

/// Declared input type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    /// Text that is never echoed back or logged
    Secret,
    Boolean,
    /// Single choice coerced to an integer id
    Select,
    File,
}

/// A selectable option of a `Select` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: RecordId,
    pub label: String,
}

impl Choice {
    pub fn new(value: RecordId, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Static declaration of one field of a form
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub validators: Vec<Validator>,
    /// Allowed options for `Select` fields; `None` accepts any integer
    pub choices: Option<Vec<Choice>>,
    /// Read-only fields ignore submitted values and keep `initial`
    pub read_only: bool,
    pub initial: Option<String>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            validators: Vec::new(),
            choices: None,
            read_only: false,
            initial: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn secret(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Secret)
    }

    pub fn boolean(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Boolean)
    }

    pub fn select(name: &'static str, label: &'static str, choices: Vec<Choice>) -> Self {
        Self {
            choices: Some(choices),
            ..Self::new(name, label, FieldKind::Select)
        }
    }

    pub fn file(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::File)
    }

    /// Append a validator; validators run in the order they are added
    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn read_only(mut self, initial: impl Into<String>) -> Self {
        self.read_only = true;
        self.initial = Some(initial.into());
        self
    }

    /// Pull this field's raw value out of the submitted payload
    pub(crate) fn bind(&self, data: &FormData) -> FieldValue {
        if self.read_only {
            return self
                .initial
                .clone()
                .map(FieldValue::Text)
                .unwrap_or(FieldValue::Missing);
        }

        match self.kind {
            FieldKind::Text | FieldKind::Secret => data
                .get(self.name)
                .map(|s| FieldValue::Text(s.to_string()))
                .unwrap_or(FieldValue::Missing),
            FieldKind::Boolean => {
                let checked = data
                    .get(self.name)
                    .map(|s| !matches!(s, "" | "false"))
                    .unwrap_or(false);
                FieldValue::Flag(checked)
            }
            FieldKind::Select => match data.get(self.name).map(str::trim) {
                None | Some("") => FieldValue::Missing,
                Some(raw) => raw
                    .parse::<RecordId>()
                    .map(FieldValue::Choice)
                    .unwrap_or_else(|_| FieldValue::Invalid(raw.to_string())),
            },
            FieldKind::File => match data.file(self.name) {
                Some(upload) if !upload.filename.is_empty() => FieldValue::File(upload.clone()),
                _ => FieldValue::Missing,
            },
        }
    }
}

/// Value held by a field after binding
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Key absent from the payload
    Missing,
    Text(String),
    Flag(bool),
    Choice(RecordId),
    /// Select input that could not be coerced to an id
    Invalid(String),
    File(FileUpload),
}

impl FieldValue {
    /// Text view used by string validators; non-text values read as empty
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) | FieldValue::Invalid(s) => s,
            _ => "",
        }
    }

    /// Whether the value counts as supplied for presence checks
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Missing => false,
            FieldValue::Text(s) | FieldValue::Invalid(s) => !s.trim().is_empty(),
            FieldValue::Flag(b) => *b,
            FieldValue::Choice(id) => *id != 0,
            FieldValue::File(_) => true,
        }
    }
}

/// A field together with its bound value and collected errors
#[derive(Debug, Clone)]
pub struct BoundField {
    pub spec: FieldSpec,
    pub value: FieldValue,
    pub errors: Vec<String>,
}

impl BoundField {
    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn kind(&self) -> FieldKind {
        self.spec.kind
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
