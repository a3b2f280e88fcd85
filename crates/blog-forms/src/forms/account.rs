// File: src/forms/account.rs
// Purpose: Self-service forms: sign up, log in, profile, password reset

use super::messages::{EMAIL_TAKEN, NO_ACCOUNT, USERNAME_TAKEN};
use super::PICTURE_EXTENSIONS;
use crate::field::FieldSpec;
use crate::schema::FormSchema;
use crate::store::EntityKind;
use crate::uniqueness::{Identity, LookupRule};
use crate::validation::Validator;

fn password_pair(schema: FormSchema) -> FormSchema {
    schema
        .field(FieldSpec::secret("password", "Password").validate(Validator::Required))
        .field(
            FieldSpec::secret("confirm_password", "Confirm Password")
                .validate(Validator::Required)
                .validate(Validator::equal_to("password")),
        )
}

fn email_field() -> FieldSpec {
    FieldSpec::text("email", "Email")
        .validate(Validator::Required)
        .validate(Validator::Email)
}

/// Sign up. Username and email must be unused.
pub fn registration() -> FormSchema {
    let schema = FormSchema::new("registration")
        .field(
            FieldSpec::text("username", "Username")
                .validate(Validator::Required)
                .validate(Validator::length(2, 20)),
        )
        .field(email_field());

    password_pair(schema)
        .rule(LookupRule::unique("username", EntityKind::User, USERNAME_TAKEN))
        .rule(LookupRule::unique("email", EntityKind::User, EMAIL_TAKEN))
}

/// Log in. Checking the credentials is left to the caller.
pub fn login() -> FormSchema {
    FormSchema::new("login")
        .field(FieldSpec::text("login_name", "Login Name").validate(Validator::Required))
        .field(FieldSpec::secret("password", "Password").validate(Validator::Required))
        .field(FieldSpec::boolean("remember", "Remember Me"))
}

/// Edit one's own profile. Keeping one's current username or email is not a conflict.
pub fn update_account(current: Identity) -> FormSchema {
    FormSchema::new("update_account")
        .field(
            FieldSpec::text("username", "Username")
                .validate(Validator::Required)
                .validate(Validator::length(2, 20)),
        )
        .field(email_field())
        .field(
            FieldSpec::file("picture", "Update Profile Picture")
                .validate(Validator::FileAllowed(PICTURE_EXTENSIONS)),
        )
        .rule(LookupRule::unique("username", EntityKind::User, USERNAME_TAKEN).excluding(current))
        .rule(LookupRule::unique("email", EntityKind::User, EMAIL_TAKEN).excluding(current))
}

/// Ask for a reset link. The email must belong to an account.
pub fn request_reset() -> FormSchema {
    FormSchema::new("request_reset")
        .field(email_field())
        .rule(LookupRule::must_exist("email", EntityKind::User, NO_ACCOUNT))
}

/// Choose a new password after following a reset link
pub fn reset_password() -> FormSchema {
    password_pair(FormSchema::new("reset_password"))
}
