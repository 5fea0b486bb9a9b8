use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::EntryStore;
use crate::error::StoreError;
use crate::models::{EntryRecord, ManualOverride};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<Uuid, Vec<EntryRecord>>>,
    overrides: RwLock<HashMap<Uuid, ManualOverride>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record; a later record for the same date supersedes the
    /// earlier one once analyzed.
    pub fn insert(&self, user_id: Uuid, record: EntryRecord) -> Result<(), StoreError> {
        self.entries
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .entry(user_id)
            .or_default()
            .push(record);
        Ok(())
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn fetch_entries(&self, user_id: Uuid) -> Result<Vec<EntryRecord>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(&user_id).cloned().unwrap_or_default())
    }

    async fn fetch_override(&self, user_id: Uuid) -> Result<Option<ManualOverride>, StoreError> {
        let overrides = self.overrides.read().map_err(|_| StoreError::Poisoned)?;
        Ok(overrides.get(&user_id).copied())
    }

    async fn save_override(&self, user_id: Uuid, manual: ManualOverride) -> Result<(), StoreError> {
        self.overrides
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .insert(user_id, manual);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_users_apart() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store
            .insert(
                alice,
                EntryRecord {
                    entry_date: "2024-01-01".into(),
                    flow: "Heavy".into(),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(store.fetch_entries(alice).await.unwrap().len(), 1);
        assert!(store.fetch_entries(bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn override_roundtrip() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        assert_eq!(store.fetch_override(user).await.unwrap(), None);

        store.save_override(user, ManualOverride::new(30, 4)).await.unwrap();
        store.save_override(user, ManualOverride::new(29, 5)).await.unwrap();
        assert_eq!(
            store.fetch_override(user).await.unwrap(),
            Some(ManualOverride::new(29, 5))
        );
    }
}
