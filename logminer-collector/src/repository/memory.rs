//! In-memory [`LogStore`] used by tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use logminer_core::domain::log::LogRecord;
use uuid::Uuid;

use super::log::{LogStore, StoreError};

#[derive(Default)]
pub struct MemoryLogStore {
    records: Mutex<HashMap<Uuid, LogRecord>>,
}

impl MemoryLogStore {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn all(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn insert(&self, record: &LogRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LogRecord>, StoreError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }
}

/// Store that rejects every operation, as an unreachable database would
pub struct UnavailableLogStore;

#[async_trait]
impl LogStore for UnavailableLogStore {
    async fn insert(&self, _record: &LogRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<LogRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}
