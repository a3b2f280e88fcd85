// File: src/submission.rs
// Purpose: Submission lifecycle: bound -> validating -> accepted | rejected

use crate::error::StoreResult;
use crate::field::{BoundField, FieldKind, FieldValue};
use crate::schema::FormCheck;
use crate::form_data::FileUpload;
use crate::store::{RecordId, RecordStore};
use crate::uniqueness::{LookupRule, UniquenessChecker};
use crate::validation::{run_field_chain, FieldErrors, ValidationError};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use tracing::{debug, info, warn};

/// Lifecycle states of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Unbound,
    Bound,
    Validating,
    Accepted,
    Rejected,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionState::Unbound => "unbound",
            SubmissionState::Bound => "bound",
            SubmissionState::Validating => "validating",
            SubmissionState::Accepted => "accepted",
            SubmissionState::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// A schema with submitted values bound, waiting for the submit trigger
#[derive(Debug, Clone)]
pub struct BoundForm {
    name: &'static str,
    fields: Vec<BoundField>,
    rules: Vec<LookupRule>,
    checks: Vec<FormCheck>,
}

impl BoundForm {
    pub(crate) fn new(
        name: &'static str,
        fields: Vec<BoundField>,
        rules: Vec<LookupRule>,
        checks: Vec<FormCheck>,
    ) -> Self {
        Self {
            name,
            fields,
            rules,
            checks,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> SubmissionState {
        SubmissionState::Bound
    }

    pub fn fields(&self) -> &[BoundField] {
        &self.fields
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name() == name).map(|f| &f.value)
    }

    /// Run every field's validators, then the lookup rules, then the form-level
    /// checks, and settle the outcome.
    ///
    /// All fields are evaluated even after an earlier one fails. A field whose
    /// presence check failed skips its lookup rules. Store failures abort with
    /// an error instead of producing a field message.
    pub async fn validate<S: RecordStore + ?Sized>(mut self, store: &S) -> StoreResult<Outcome> {
        debug!(form = self.name, state = %SubmissionState::Validating, "submission transition");

        let results: Vec<(Vec<String>, bool)> = self
            .fields
            .iter()
            .map(|field| run_field_chain(field, &self.fields))
            .collect();

        let mut stopped = Vec::with_capacity(results.len());
        for (field, (messages, halted)) in self.fields.iter_mut().zip(results) {
            field.errors = messages;
            stopped.push(halted);
        }

        let checker = UniquenessChecker::new(store);
        for rule in &self.rules {
            let Some(idx) = self.fields.iter().position(|f| f.name() == rule.field) else {
                continue;
            };
            if stopped[idx] {
                continue;
            }

            let verdict = rule.evaluate(&self.fields[idx], &checker).await;
            match verdict {
                Ok(Some(message)) => self.fields[idx].errors.push(message),
                Ok(None) => {}
                Err(err) => {
                    warn!(form = self.name, field = rule.field, error = %err, "record store lookup failed");
                    return Err(err);
                }
            }
        }

        let mut form_errors: Vec<ValidationError> = Vec::new();
        for check in &self.checks {
            let Some(error) = check(&self.fields) else {
                continue;
            };
            debug!(form = self.name, field = %error.field, "form check failed");
            match self.fields.iter_mut().find(|f| f.name() == error.field) {
                Some(field) => field.errors.push(error.message),
                None => form_errors.push(error),
            }
        }

        let mut errors = FieldErrors::new();
        for field in &self.fields {
            errors.extend_field(field.name(), field.errors.iter().cloned());
        }
        for error in form_errors {
            errors.push(error);
        }

        if errors.is_empty() {
            info!(form = self.name, state = %SubmissionState::Accepted, "submission validated");
            Ok(Outcome::Accepted(CleanedData::from_fields(self.name, self.fields)))
        } else {
            info!(
                form = self.name,
                state = %SubmissionState::Rejected,
                failed_fields = errors.len(),
                "submission validated"
            );
            Ok(Outcome::Rejected(Rejection {
                form: self.name,
                fields: self.fields,
                errors,
            }))
        }
    }
}

/// Terminal result of a submission
#[derive(Debug, Clone)]
pub enum Outcome {
    Accepted(CleanedData),
    Rejected(Rejection),
}

impl Outcome {
    pub fn state(&self) -> SubmissionState {
        match self {
            Outcome::Accepted(_) => SubmissionState::Accepted,
            Outcome::Rejected(_) => SubmissionState::Rejected,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn accepted(self) -> Option<CleanedData> {
        match self {
            Outcome::Accepted(data) => Some(data),
            Outcome::Rejected(_) => None,
        }
    }

    /// Errors of a rejected submission; empty when accepted
    pub fn errors(&self) -> FieldErrors {
        match self {
            Outcome::Accepted(_) => FieldErrors::new(),
            Outcome::Rejected(rejection) => rejection.errors.clone(),
        }
    }
}

/// A rejected submission, kept so the form can be shown again with its messages
#[derive(Debug, Clone)]
pub struct Rejection {
    form: &'static str,
    fields: Vec<BoundField>,
    errors: FieldErrors,
}

impl Rejection {
    pub fn form(&self) -> &'static str {
        self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn fields(&self) -> &[BoundField] {
        &self.fields
    }

    /// Value to put back into the field when re-rendering; secrets and files are never echoed
    pub fn redisplay_value(&self, name: &str) -> Option<&str> {
        let field = self.fields.iter().find(|f| f.name() == name)?;
        match field.kind() {
            FieldKind::Secret | FieldKind::File => None,
            _ => match &field.value {
                FieldValue::Missing => None,
                value => Some(value.as_text()),
            },
        }
    }
}

/// Values of an accepted submission, in field order
#[derive(Debug, Clone)]
pub struct CleanedData {
    form: &'static str,
    values: Vec<(&'static str, FieldKind, FieldValue)>,
}

impl CleanedData {
    fn from_fields(form: &'static str, fields: Vec<BoundField>) -> Self {
        let values = fields
            .into_iter()
            .map(|f| (f.spec.name, f.spec.kind, f.value))
            .collect();
        Self { form, values }
    }

    pub fn form(&self) -> &'static str {
        self.form
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, _, v)| v)
    }

    /// Text or secret value; `None` when the field was absent
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(FieldValue::Flag(true)))
    }

    pub fn choice(&self, name: &str) -> Option<RecordId> {
        match self.get(name)? {
            FieldValue::Choice(id) => Some(*id),
            _ => None,
        }
    }

    pub fn file(&self, name: &str) -> Option<&FileUpload> {
        match self.get(name)? {
            FieldValue::File(upload) => Some(upload),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldKind, &FieldValue)> {
        self.values.iter().map(|(n, k, v)| (*n, *k, v))
    }
}

/// Serializes to a JSON-friendly map with secret values redacted
impl Serialize for CleanedData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, kind, value) in &self.values {
            let json = match (kind, value) {
                (_, FieldValue::Missing) => serde_json::Value::Null,
                (FieldKind::Secret, _) => serde_json::Value::from("********"),
                (_, FieldValue::Text(s)) | (_, FieldValue::Invalid(s)) => serde_json::Value::from(s.as_str()),
                (_, FieldValue::Flag(b)) => serde_json::Value::from(*b),
                (_, FieldValue::Choice(id)) => serde_json::Value::from(*id),
                (_, FieldValue::File(upload)) => serde_json::json!({
                    "filename": upload.filename,
                    "size": upload.size(),
                }),
            };
            map.serialize_entry(name, &json)?;
        }
        map.end()
    }
}
