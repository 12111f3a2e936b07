//! In-memory record store.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RecordStore, StoreError, UserRecord};

/// Record store backed by a process-local map. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, record: &UserRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        match records.entry(record.id.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(record.id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.records.read().await.get(id).cloned())
    }
}
