//! SQLite-backed review store.
//!
//! Handles database initialization and CRUD for the review table. Due dates
//! are persisted as epoch seconds so the listing order falls out of a plain
//! `ORDER BY`.

use chrono::DateTime;
use log::debug;
use rusqlite::{Connection, params};

use crate::error::StoreError;
use crate::models::ReviewRecord;
use crate::store::ReviewStore;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY,
                topic TEXT NOT NULL,
                due_date INTEGER NOT NULL,
                cycle INTEGER NOT NULL DEFAULT 1,
                last_interval INTEGER NOT NULL DEFAULT 0
            )",
            (),
        )?;

        Ok(Self { conn })
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// Rebuilds a record from one row of the reviews table.
fn record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(i64, String, i64, i64, i64)> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn into_record(
    (id, topic, due_secs, cycle, last_interval): (i64, String, i64, i64, i64),
) -> Result<ReviewRecord, StoreError> {
    let due_date = DateTime::from_timestamp(due_secs, 0)
        .ok_or_else(|| StoreError::Corrupt(format!("due date {due_secs} out of range")))?;
    let cycle = u32::try_from(cycle)
        .map_err(|_| StoreError::Corrupt(format!("negative cycle {cycle}")))?;
    let last_interval = u32::try_from(last_interval)
        .map_err(|_| StoreError::Corrupt(format!("negative interval {last_interval}")))?;

    Ok(ReviewRecord {
        id,
        topic,
        due_date,
        cycle,
        last_interval,
    })
}

impl ReviewStore for SqliteStore {
    fn insert(&mut self, record: ReviewRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO reviews (id, topic, due_date, cycle, last_interval)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.id,
                record.topic,
                record.due_date.timestamp(),
                record.cycle as i64,
                record.last_interval as i64
            ],
        )?;
        debug!("stored review {} (cycle {})", record.id, record.cycle);
        Ok(())
    }

    fn delete_by_id(&mut self, id: i64) -> Result<(), StoreError> {
        // Deleting a missing id matches zero rows, which is fine
        let removed = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?1", params![id])?;
        debug!("delete of review {id} removed {removed} row(s)");
        Ok(())
    }

    fn list(&self) -> Result<Vec<ReviewRecord>, StoreError> {
        // Ids are assigned monotonically, so they double as insertion order
        let mut stmt = self.conn.prepare(
            "SELECT id, topic, due_date, cycle, last_interval
             FROM reviews
             ORDER BY due_date ASC, id ASC",
        )?;

        let rows = stmt
            .query_map([], record_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(into_record).collect()
    }

    fn find_by_id(&self, id: i64) -> Result<Option<ReviewRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, topic, due_date, cycle, last_interval
             FROM reviews WHERE id = ?1",
        )?;

        let mut rows = stmt
            .query_map(params![id], record_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        match rows.pop() {
            Some(row) => Ok(Some(into_record(row)?)),
            None => Ok(None),
        }
    }
}
