//! Error types shared across the scheduling core.
//!
//! Three failure classes exist: invalid user input (nothing mutated),
//! a missing record, and storage failures. A storage failure between the
//! delete and insert of a completion leaves a lineage with no live record,
//! which gets its own variant so the UI can tell the user exactly what
//! was lost instead of swallowing it.

use crate::models::ReviewRecord;

/// Errors raised by a [`crate::store::ReviewStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("corrupt record in storage: {0}")]
    Corrupt(String),
}

/// Errors raised by the [`crate::engine::SchedulingEngine`].
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("topic must not be empty")]
    EmptyTopic,

    #[error("invalid score: {0}")]
    InvalidScore(String),

    #[error("review {0} not found")]
    NotFound(i64),

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),

    /// The old record was deleted but its successor could not be stored.
    /// The successor is carried along so the caller can retry the insert.
    #[error("review '{}' was removed but its successor could not be saved: {source}", .record.topic)]
    BrokenLineage {
        record: Box<ReviewRecord>,
        #[source]
        source: StoreError,
    },
}
