// File: src/forms/admin.rs
// Purpose: Administration forms for users and roles

use super::messages::{EMAIL_EXISTS, LOGIN_NAME_TAKEN, PASSWORDS_MUST_MATCH, ROLE_EXISTS};
use crate::field::{Choice, FieldSpec};
use crate::schema::FormSchema;
use crate::store::EntityKind;
use crate::uniqueness::LookupRule;
use crate::validation::Validator;

fn role_select(roles: Vec<Choice>) -> FieldSpec {
    FieldSpec::select("role_id", "Role", roles).validate(Validator::Required)
}

fn admin_username() -> FieldSpec {
    FieldSpec::text("username", "Username")
        .validate(Validator::Required)
        .validate(Validator::max_length(100))
}

fn admin_email() -> FieldSpec {
    FieldSpec::text("email", "Email Address")
        .validate(Validator::Required)
        .validate(Validator::Email)
}

/// Create a user on someone's behalf. `roles` are the selectable roles.
pub fn add_user(roles: Vec<Choice>) -> FormSchema {
    FormSchema::new("add_user")
        .field(
            FieldSpec::text("login_name", "Login Name")
                .validate(Validator::Required)
                .validate(Validator::length(4, 25)),
        )
        .field(admin_username())
        .field(admin_email())
        .field(FieldSpec::secret("password", "New Password").validate(Validator::Required))
        .field(
            FieldSpec::secret("confirm_password", "Confirm Password")
                .validate(Validator::Required)
                .validate(Validator::equal_to_with_message("password", PASSWORDS_MUST_MATCH)),
        )
        .field(role_select(roles))
        .rule(LookupRule::unique("login_name", EntityKind::User, LOGIN_NAME_TAKEN))
        .rule(LookupRule::unique("email", EntityKind::User, EMAIL_EXISTS))
}

/// Edit an existing user. The login name is shown but cannot be changed.
///
/// No email uniqueness rule is attached. Callers that want it can add
/// `LookupRule::unique("email", EntityKind::User, EMAIL_EXISTS).excluding(edited)`.
pub fn edit_user(login_name: impl Into<String>, roles: Vec<Choice>) -> FormSchema {
    FormSchema::new("edit_user")
        .field(FieldSpec::text("login_name", "Login Name").read_only(login_name))
        .field(admin_username())
        .field(admin_email())
        .field(role_select(roles))
}

/// Create a role. Names are unique.
pub fn role() -> FormSchema {
    FormSchema::new("role")
        .field(
            FieldSpec::text("name", "Name")
                .validate(Validator::Required)
                .validate(Validator::length(4, 20)),
        )
        .field(
            FieldSpec::text("description", "Description")
                .validate(Validator::Required)
                .validate(Validator::max_length(200)),
        )
        .field(FieldSpec::boolean("is_admin", "Admin Role?"))
        .rule(LookupRule::unique("name", EntityKind::Role, ROLE_EXISTS))
}
