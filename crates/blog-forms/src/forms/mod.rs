//! The blog's form definitions
//!
//! Each function builds a fresh [`FormSchema`](crate::FormSchema) for one
//! submission. Anything a schema needs from the request (the signed-in
//! identity, the list of roles) is passed in explicitly.

pub mod account;
pub mod admin;

pub use account::{login, registration, request_reset, reset_password, update_account};
pub use admin::{add_user, edit_user, role};

/// Fixed messages for store-backed rules
pub mod messages {
    pub const USERNAME_TAKEN: &str = "That username is taken. Please choose a different one.";
    pub const EMAIL_TAKEN: &str = "That email is taken. Please choose a different one.";
    pub const LOGIN_NAME_TAKEN: &str = "That login name is taken, please select another one";
    pub const EMAIL_EXISTS: &str = "That email already exists";
    pub const ROLE_EXISTS: &str = "This role already exists, please select another one";
    pub const NO_ACCOUNT: &str = "There is no account with that email. You must register first.";
    pub const PASSWORDS_MUST_MATCH: &str = "Passwords must match";
}

/// Extensions accepted for profile pictures
pub const PICTURE_EXTENSIONS: &[&str] = &["jpg", "png"];
