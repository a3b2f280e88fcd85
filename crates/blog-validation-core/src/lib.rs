//! Blog Validation Core
//!
//! Pure validation functions shared by the blog form schemas.
//! Every function takes the raw submitted text and returns either `Ok(())`
//! or the human readable message shown next to the field.

pub mod email;
pub mod file;
pub mod string;

// Re-export all validators
pub use email::*;
pub use file::*;
pub use string::*;
