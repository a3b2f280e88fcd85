// File: src/error.rs
// Purpose: Infrastructure errors raised by the record store

use crate::store::EntityKind;
use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that stop a submission before it can be accepted or rejected.
///
/// None of these is a validation failure: callers render a generic failure
/// response instead of attaching a message to a field.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// The SQL backend reported an error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The lookup named a column the entity does not expose
    #[error("{entity} records cannot be looked up by `{field}`")]
    UnknownField { entity: EntityKind, field: String },
}
