// File: src/schema.rs
// Purpose: Declarative form definitions (fields + lookup rules + form checks)

use crate::field::{BoundField, FieldSpec};
use crate::form_data::FormData;
use crate::submission::{BoundForm, SubmissionState};
use crate::uniqueness::LookupRule;
use crate::validation::ValidationError;
use tracing::debug;

/// Form-level check over the whole bound field set.
///
/// Runs after every field chain and lookup rule, so each field's `errors`
/// are already filled in. Returning an error rejects the submission; the
/// error may name a declared field or a form-wide key.
pub type FormCheck = fn(&[BoundField]) -> Option<ValidationError>;

/// An ordered set of fields plus the rules and checks that run after them.
///
/// A schema is the unbound state of a submission: build one per request,
/// then [`bind`](FormSchema::bind) the submitted data to it. The set of field
/// names is fixed once the schema is built.
#[derive(Debug, Clone)]
pub struct FormSchema {
    name: &'static str,
    fields: Vec<FieldSpec>,
    rules: Vec<LookupRule>,
    checks: Vec<FormCheck>,
}

impl FormSchema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            rules: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Declare a field. Field names must be unique within the form.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        assert!(
            self.field_spec(spec.name).is_none(),
            "form `{}` declares field `{}` twice",
            self.name,
            spec.name
        );
        self.fields.push(spec);
        self
    }

    /// Attach a lookup rule to an already declared field
    pub fn rule(mut self, rule: LookupRule) -> Self {
        assert!(
            self.field_spec(rule.field).is_some(),
            "form `{}` has no field `{}` for a lookup rule",
            self.name,
            rule.field
        );
        self.rules.push(rule);
        self
    }

    /// Attach a form-level check that sees every bound field
    pub fn check(mut self, check: FormCheck) -> Self {
        self.checks.push(check);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> SubmissionState {
        SubmissionState::Unbound
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn rules(&self) -> &[LookupRule] {
        &self.rules
    }

    pub fn checks(&self) -> &[FormCheck] {
        &self.checks
    }

    /// Bind submitted values to every declared field; unknown keys are ignored
    pub fn bind(self, data: &FormData) -> BoundForm {
        debug!(form = self.name, "binding submission");
        let fields = self
            .fields
            .into_iter()
            .map(|spec| {
                let value = spec.bind(data);
                BoundField {
                    spec,
                    value,
                    errors: Vec::new(),
                }
            })
            .collect();

        BoundForm::new(self.name, fields, self.rules, self.checks)
    }
}
