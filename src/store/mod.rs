//! Persistence for the live review set.
//!
//! The scheduling engine only talks to the [`ReviewStore`] trait; the durable
//! backend is SQLite, with an in-memory backend for tests and throwaway use.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::StoreError;
use crate::models::ReviewRecord;

/// Collection of live review records, ordered by due date.
///
/// Every mutation must be fully visible to the next `list` call; there are
/// no partial writes. `delete_by_id` on a missing id is a no-op, not an
/// error, so retried deletes stay harmless.
pub trait ReviewStore {
    fn insert(&mut self, record: ReviewRecord) -> Result<(), StoreError>;

    fn delete_by_id(&mut self, id: i64) -> Result<(), StoreError>;

    /// All live records, ascending by due date; ties keep insertion order.
    fn list(&self) -> Result<Vec<ReviewRecord>, StoreError>;

    /// Authoritative lookup straight from the backend, never a cached copy.
    fn find_by_id(&self, id: i64) -> Result<Option<ReviewRecord>, StoreError>;
}
