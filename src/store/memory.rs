//! In-memory review store, the moral equivalent of the browser-local
//! storage variant of this app. Also the test double for the engine.

use crate::error::StoreError;
use crate::models::ReviewRecord;
use crate::store::ReviewStore;

#[derive(Default)]
pub struct MemoryStore {
    records: Vec<ReviewRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ReviewStore for MemoryStore {
    fn insert(&mut self, record: ReviewRecord) -> Result<(), StoreError> {
        self.records.push(record);
        // Stable sort keeps insertion order on equal due dates
        self.records.sort_by_key(|r| r.due_date);
        Ok(())
    }

    fn delete_by_id(&mut self, id: i64) -> Result<(), StoreError> {
        self.records.retain(|r| r.id != id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<ReviewRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<ReviewRecord>, StoreError> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }
}
