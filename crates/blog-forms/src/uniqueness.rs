// File: src/uniqueness.rs
// Purpose: Lookups against persisted records for uniqueness and existence rules

use crate::error::StoreResult;
use crate::field::BoundField;
use crate::store::{EntityKind, RecordId, RecordStore};
use std::borrow::Cow;
use tracing::debug;

/// Identity of the record being edited, used to exclude self-matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    pub id: RecordId,
}

impl Identity {
    pub fn new(id: RecordId) -> Self {
        Self { id }
    }
}

/// Answers "is this value already taken?" against a record store.
///
/// Read-only. Every call issues exactly one lookup.
pub struct UniquenessChecker<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> UniquenessChecker<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Whether a record of `kind` with `field == value` exists.
    ///
    /// A match on `exclude_current` itself does not count. Store failures are
    /// returned as errors, never as "no conflict".
    pub async fn exists(
        &self,
        kind: EntityKind,
        field: &str,
        value: &str,
        exclude_current: Option<Identity>,
    ) -> StoreResult<bool> {
        let found = self.store.find_one(kind, field, value).await?;

        let conflict = match (found, exclude_current) {
            (Some(record), Some(current)) => record.id != current.id,
            (Some(_), None) => true,
            (None, _) => false,
        };

        debug!(
            store = self.store.name(),
            %kind,
            field,
            found = found.is_some(),
            conflict,
            "uniqueness lookup"
        );

        Ok(conflict)
    }
}

/// Whether a lookup rule wants the value to be absent or present in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Fail if another record already holds the value
    Unique,
    /// Fail if no record holds the value
    MustExist,
}

/// A store-backed rule attached to one field of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRule {
    pub field: &'static str,
    pub entity: EntityKind,
    pub column: &'static str,
    pub expectation: Expectation,
    pub exclude: Option<Identity>,
    pub message: Cow<'static, str>,
}

impl LookupRule {
    /// The field's value must not already exist on `entity` (same column name)
    pub fn unique(field: &'static str, entity: EntityKind, message: &'static str) -> Self {
        Self {
            field,
            entity,
            column: field,
            expectation: Expectation::Unique,
            exclude: None,
            message: Cow::Borrowed(message),
        }
    }

    /// The field's value must already exist on `entity`
    pub fn must_exist(field: &'static str, entity: EntityKind, message: &'static str) -> Self {
        Self {
            expectation: Expectation::MustExist,
            ..Self::unique(field, entity, message)
        }
    }

    /// Look the value up in a differently named column
    pub fn on_column(mut self, column: &'static str) -> Self {
        self.column = column;
        self
    }

    /// Ignore a match against the record currently being edited
    pub fn excluding(mut self, current: Identity) -> Self {
        self.exclude = Some(current);
        self
    }

    /// Evaluate the rule for a bound field; `Ok(Some(message))` is a field error
    pub async fn evaluate<S: RecordStore + ?Sized>(
        &self,
        field: &BoundField,
        checker: &UniquenessChecker<'_, S>,
    ) -> StoreResult<Option<String>> {
        let value = field.value.as_text();
        let exists = checker
            .exists(self.entity, self.column, value, self.exclude)
            .await?;

        let failed = match self.expectation {
            Expectation::Unique => exists,
            Expectation::MustExist => !exists,
        };

        Ok(failed.then(|| self.message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::field::{FieldSpec, FieldValue};
    use crate::store::MemoryStore;

    async fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_user(1, "alice01", "alice", "alice@example.com").await;
        store
    }

    fn email_field(value: &str) -> BoundField {
        BoundField {
            spec: FieldSpec::text("email", "Email"),
            value: FieldValue::Text(value.to_string()),
            errors: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_exists_detects_conflict() {
        let store = store().await;
        let checker = UniquenessChecker::new(&store);

        assert!(checker.exists(EntityKind::User, "username", "alice", None).await.unwrap());
        assert!(!checker.exists(EntityKind::User, "username", "bob", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_excludes_current_identity() {
        let store = store().await;
        let checker = UniquenessChecker::new(&store);

        let own = Identity::new(1);
        let other = Identity::new(2);
        assert!(!checker.exists(EntityKind::User, "email", "alice@example.com", Some(own)).await.unwrap());
        assert!(checker.exists(EntityKind::User, "email", "alice@example.com", Some(other)).await.unwrap());
    }

    #[tokio::test]
    async fn test_one_lookup_per_call() {
        let store = store().await;
        let checker = UniquenessChecker::new(&store);

        checker.exists(EntityKind::User, "email", "x@y.com", None).await.unwrap();
        checker.exists(EntityKind::User, "email", "alice@example.com", Some(Identity::new(1))).await.unwrap();
        assert_eq!(store.lookup_count(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_store_propagates() {
        let store = store().await;
        store.set_offline(true);
        let checker = UniquenessChecker::new(&store);

        let err = checker
            .exists(EntityKind::User, "email", "alice@example.com", None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_rules() {
        let store = store().await;
        let checker = UniquenessChecker::new(&store);

        let unique = LookupRule::unique("email", EntityKind::User, "taken");
        let exist = LookupRule::must_exist("email", EntityKind::User, "no account");

        let taken = email_field("alice@example.com");
        let fresh = email_field("new@example.com");

        assert_eq!(unique.evaluate(&taken, &checker).await.unwrap(), Some("taken".to_string()));
        assert_eq!(unique.evaluate(&fresh, &checker).await.unwrap(), None);
        assert_eq!(exist.evaluate(&taken, &checker).await.unwrap(), None);
        assert_eq!(exist.evaluate(&fresh, &checker).await.unwrap(), Some("no account".to_string()));
    }
}
