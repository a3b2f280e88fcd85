// Blog Forms - form schemas and validation for the blog
// Field validators, store-backed uniqueness checks and the submission lifecycle

pub mod config;
pub mod error;
pub mod field;
pub mod form_data;
pub mod forms;
pub mod schema;
pub mod store;
pub mod submission;
pub mod uniqueness;
pub mod validation;

// Re-export framework types
pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use field::{BoundField, Choice, FieldKind, FieldSpec, FieldValue};
pub use form_data::{FileUpload, FormData};
pub use schema::{FormCheck, FormSchema};
pub use store::{EntityKind, MemoryStore, Record, RecordId, RecordStore, SqlStore};
pub use submission::{BoundForm, CleanedData, Outcome, Rejection, SubmissionState};
pub use uniqueness::{Identity, LookupRule, UniquenessChecker};
pub use validation::{FieldErrors, ValidationError, Validator};
