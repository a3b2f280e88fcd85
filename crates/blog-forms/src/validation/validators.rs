// File: src/validation/validators.rs
// Purpose: Per-field validator kinds and the chain that runs them

use crate::field::{BoundField, FieldKind, FieldValue};
use blog_validation_core as checks;
use std::borrow::Cow;

/// Message for a select value that is not an integer
pub const INVALID_CHOICE_COERCE: &str = "Invalid Choice: could not coerce.";
/// Message for a select value outside the declared choices
pub const NOT_A_VALID_CHOICE: &str = "Not a valid choice.";

/// One check attached to a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// Value must be supplied; failing it stops the rest of the field's checks
    Required,
    /// Character count within inclusive bounds
    Length { min: Option<usize>, max: Option<usize> },
    /// Well-formed email address
    Email,
    /// Value must equal the named sibling field
    EqualTo {
        other: &'static str,
        message: Option<Cow<'static, str>>,
    },
    /// Uploaded file name must carry one of these extensions; no upload passes
    FileAllowed(&'static [&'static str]),
}

/// Result of a single validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Pass,
    /// Record the message and keep checking
    Fail(String),
    /// Record the message and skip the field's remaining checks
    Stop(String),
}

impl Validator {
    pub fn length(min: usize, max: usize) -> Self {
        Validator::Length {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn max_length(max: usize) -> Self {
        Validator::Length {
            min: None,
            max: Some(max),
        }
    }

    pub fn equal_to(other: &'static str) -> Self {
        Validator::EqualTo {
            other,
            message: None,
        }
    }

    pub fn equal_to_with_message(other: &'static str, message: &'static str) -> Self {
        Validator::EqualTo {
            other,
            message: Some(Cow::Borrowed(message)),
        }
    }

    /// Run this validator against `field`, with `fields` available for cross-field checks
    pub fn check(&self, field: &BoundField, fields: &[BoundField]) -> Check {
        let value = &field.value;

        let result = match self {
            Validator::Required => {
                if value.is_present() {
                    Ok(())
                } else {
                    return Check::Stop(checks::REQUIRED.to_string());
                }
            }
            Validator::Length { min, max } => checks::validate_length(value.as_text(), *min, *max),
            Validator::Email => checks::validate_email(value.as_text()),
            Validator::EqualTo { other, message } => {
                match fields.iter().find(|f| f.name() == *other) {
                    None => Err(format!("Invalid field name '{}'.", other)),
                    Some(sibling) => checks::validate_equals(
                        value.as_text(),
                        sibling.value.as_text(),
                        other,
                    )
                    .map_err(|default| {
                        message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or(default)
                    }),
                }
            }
            Validator::FileAllowed(allowed) => match value {
                FieldValue::File(upload) => checks::validate_extension(&upload.filename, allowed),
                _ => Ok(()),
            },
        };

        match result {
            Ok(()) => Check::Pass,
            Err(message) => Check::Fail(message),
        }
    }
}

/// Run every validator of one field in declaration order.
///
/// Returns the messages collected and whether the chain was stopped by a
/// presence failure. Choice coercion and membership are checked first for
/// select fields.
pub fn run_field_chain(field: &BoundField, fields: &[BoundField]) -> (Vec<String>, bool) {
    let mut messages = Vec::new();

    if field.kind() == FieldKind::Select {
        match &field.value {
            FieldValue::Invalid(_) => messages.push(INVALID_CHOICE_COERCE.to_string()),
            FieldValue::Choice(id) => {
                if let Some(choices) = &field.spec.choices {
                    if !choices.iter().any(|c| c.value == *id) {
                        messages.push(NOT_A_VALID_CHOICE.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    for validator in &field.spec.validators {
        match validator.check(field, fields) {
            Check::Pass => {}
            Check::Fail(message) => messages.push(message),
            Check::Stop(message) => {
                messages.push(message);
                return (messages, true);
            }
        }
    }

    (messages, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Choice, FieldSpec};
    use rstest::rstest;
    use crate::form_data::FileUpload;

    fn bound(spec: FieldSpec, value: FieldValue) -> BoundField {
        BoundField {
            spec,
            value,
            errors: Vec::new(),
        }
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_required_stops_chain() {
        let field = bound(
            FieldSpec::text("username", "Username")
                .validate(Validator::Required)
                .validate(Validator::length(2, 20)),
            FieldValue::Missing,
        );
        let (messages, stopped) = run_field_chain(&field, &[]);
        assert!(stopped);
        assert_eq!(messages, vec![checks::REQUIRED.to_string()]);
    }

    #[test]
    fn test_non_presence_failures_accumulate() {
        let field = bound(
            FieldSpec::text("email", "Email")
                .validate(Validator::max_length(3))
                .validate(Validator::Email),
            text("not-an-email"),
        );
        let (messages, stopped) = run_field_chain(&field, &[]);
        assert!(!stopped);
        assert_eq!(messages.len(), 2);
    }

    #[rstest]
    #[case(FieldValue::Missing)]
    #[case(text(""))]
    #[case(text("   \t\n"))]
    #[case(text("anything at all"))]
    #[case(text("héllo wörld ✓ 日本語"))]
    #[case(text(&"x".repeat(10_000)))]
    #[case(text("not-an-email@"))]
    fn test_no_validators_accepts_anything(#[case] value: FieldValue) {
        let field = bound(FieldSpec::text("bio", "Bio"), value);
        assert_eq!(run_field_chain(&field, &[]), (Vec::new(), false));
    }

    #[test]
    fn test_equal_to_uses_sibling_value() {
        let password = bound(FieldSpec::secret("password", "Password"), text("hunter2"));
        let confirm = bound(
            FieldSpec::secret("confirm_password", "Confirm Password")
                .validate(Validator::equal_to("password")),
            text("hunter3"),
        );
        let fields = vec![password, confirm.clone()];

        assert_eq!(
            confirm.spec.validators[0].check(&confirm, &fields),
            Check::Fail("Field must be equal to password.".to_string())
        );
    }

    #[test]
    fn test_equal_to_custom_message() {
        let password = bound(FieldSpec::secret("password", "Password"), text("a"));
        let confirm = bound(
            FieldSpec::secret("confirm_password", "Confirm Password")
                .validate(Validator::equal_to_with_message("password", "Passwords must match")),
            text("b"),
        );
        let fields = vec![password, confirm.clone()];
        let (messages, _) = run_field_chain(&confirm, &fields);
        assert_eq!(messages, vec!["Passwords must match".to_string()]);
    }

    #[test]
    fn test_equal_to_unknown_sibling() {
        let confirm = bound(
            FieldSpec::secret("confirm", "Confirm").validate(Validator::equal_to("nope")),
            text("x"),
        );
        let (messages, _) = run_field_chain(&confirm, &[]);
        assert_eq!(messages, vec!["Invalid field name 'nope'.".to_string()]);
    }

    #[test]
    fn test_file_allowed() {
        let spec = FieldSpec::file("picture", "Picture").validate(Validator::FileAllowed(&["jpg", "png"]));

        let none = bound(spec.clone(), FieldValue::Missing);
        assert!(run_field_chain(&none, &[]).0.is_empty());

        let gif = bound(spec, FieldValue::File(FileUpload::new("me.gif", vec![1])));
        assert_eq!(
            run_field_chain(&gif, &[]).0,
            vec!["File does not have an approved extension: jpg, png".to_string()]
        );
    }

    #[test]
    fn test_select_membership() {
        let spec = FieldSpec::select("role_id", "Role", vec![Choice::new(1, "admin")])
            .validate(Validator::Required);

        let unknown = bound(spec.clone(), FieldValue::Choice(9));
        assert_eq!(run_field_chain(&unknown, &[]).0, vec![NOT_A_VALID_CHOICE.to_string()]);

        let garbage = bound(spec.clone(), FieldValue::Invalid("x".to_string()));
        assert_eq!(run_field_chain(&garbage, &[]).0, vec![INVALID_CHOICE_COERCE.to_string()]);

        let missing = bound(spec, FieldValue::Missing);
        assert_eq!(
            run_field_chain(&missing, &[]),
            (vec![checks::REQUIRED.to_string()], true)
        );
    }
}
