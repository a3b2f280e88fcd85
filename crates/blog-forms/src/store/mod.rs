//! Read-only access to persisted users and roles

use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod memory;
pub mod sql;

pub use memory::MemoryStore;
pub use sql::SqlStore;

/// Primary key of a persisted record
pub type RecordId = i64;

/// Kinds of records the forms look up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Role,
}

impl EntityKind {
    /// Table holding records of this kind
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Role => "roles",
        }
    }

    /// Columns that may be used for lookups
    pub fn lookup_columns(self) -> &'static [&'static str] {
        match self {
            EntityKind::User => &["username", "email", "login_name"],
            EntityKind::Role => &["name"],
        }
    }

    /// Resolve a lookup column, rejecting anything not declared above
    pub fn column(self, field: &str) -> StoreResult<&'static str> {
        self.lookup_columns()
            .iter()
            .copied()
            .find(|c| *c == field)
            .ok_or_else(|| StoreError::UnknownField {
                entity: self,
                field: field.to_string(),
            })
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => f.write_str("user"),
            EntityKind::Role => f.write_str("role"),
        }
    }
}

/// A record found by a lookup. Only its identity matters to the forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub kind: EntityKind,
    pub id: RecordId,
}

/// Trait for record store backends
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Find the first record of `kind` whose `field` equals `value`
    async fn find_one(
        &self,
        kind: EntityKind,
        field: &str,
        value: &str,
    ) -> StoreResult<Option<Record>>;

    /// Get store backend name
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_columns() {
        assert_eq!(EntityKind::User.column("email").ok(), Some("email"));
        assert_eq!(EntityKind::Role.column("name").ok(), Some("name"));
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let err = EntityKind::Role.column("email").unwrap_err();
        assert!(matches!(err, StoreError::UnknownField { entity: EntityKind::Role, .. }));
        assert_eq!(err.to_string(), "role records cannot be looked up by `email`");
    }
}
