//! In-memory record store
//!
//! Keeps records in a HashMap. Used by tests and by tooling that has no
//! database at hand. It can be switched offline to exercise the
//! unreachable-store path.

use super::{EntityKind, Record, RecordId, RecordStore};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredRecord {
    id: RecordId,
    fields: HashMap<String, String>,
}

/// In-memory store backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<EntityKind, Vec<StoredRecord>>>>,
    offline: Arc<AtomicBool>,
    lookups: Arc<AtomicUsize>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record with the given column values
    pub async fn insert(&self, kind: EntityKind, id: RecordId, fields: &[(&str, &str)]) {
        let fields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut records = self.records.write().await;
        records
            .entry(kind)
            .or_default()
            .push(StoredRecord { id, fields });
    }

    /// Convenience for seeding a user
    pub async fn insert_user(&self, id: RecordId, login_name: &str, username: &str, email: &str) {
        self.insert(
            EntityKind::User,
            id,
            &[("login_name", login_name), ("username", username), ("email", email)],
        )
        .await;
    }

    /// Convenience for seeding a role
    pub async fn insert_role(&self, id: RecordId, name: &str) {
        self.insert(EntityKind::Role, id, &[("name", name)]).await;
    }

    /// Make every following lookup fail as if the store were unreachable
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of lookups served or attempted so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_one(
        &self,
        kind: EntityKind,
        field: &str,
        value: &str,
    ) -> StoreResult<Option<Record>> {
        let column = kind.column(field)?;
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }

        let records = self.records.read().await;
        let found = records
            .get(&kind)
            .and_then(|rows| {
                rows.iter()
                    .find(|row| row.fields.get(column).map(String::as_str) == Some(value))
            })
            .map(|row| Record { kind, id: row.id });

        Ok(found)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_one() {
        let store = MemoryStore::new();
        store.insert_user(7, "alice01", "alice", "alice@example.com").await;

        let found = store
            .find_one(EntityKind::User, "email", "alice@example.com")
            .await
            .unwrap();
        assert_eq!(found, Some(Record { kind: EntityKind::User, id: 7 }));

        let missing = store
            .find_one(EntityKind::User, "username", "bob")
            .await
            .unwrap();
        assert!(missing.is_none());
        assert_eq!(store.lookup_count(), 2);
    }

    #[tokio::test]
    async fn test_kinds_are_separate() {
        let store = MemoryStore::new();
        store.insert_role(1, "admin").await;

        let found = store.find_one(EntityKind::Role, "name", "admin").await.unwrap();
        assert!(found.is_some());

        let err = store.find_one(EntityKind::User, "name", "admin").await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownField { .. }));
    }

    #[tokio::test]
    async fn test_offline_store_errors() {
        let store = MemoryStore::new();
        store.set_offline(true);

        let err = store.find_one(EntityKind::User, "email", "a@b.com").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
