//! Task record history, persisted as a JSON array in a single kv slot.
//!
//! The store is ordered most-recent-first: appends insert at the head, and
//! the indices taken by `update_at`/`delete_many` are positions in the
//! snapshot the caller last read.

use std::collections::HashSet;

use crate::error::{CoreError, Result, StorageError};
use crate::record::TaskRecord;

use super::database::Database;

/// Slot holding the serialized history.
pub const RECORDS_KEY: &str = "task_records";

/// Persistent, ordered list of completed task records.
pub struct RecordStore {
    db: Database,
    records: Vec<TaskRecord>,
}

impl RecordStore {
    /// Open the store over the default database.
    pub fn open() -> Result<Self> {
        Ok(Self::with_database(Database::open()?)?)
    }

    /// Open the store over an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        Self::with_database(Database::open_memory()?)
    }

    /// Load the history from `db`. An absent or unparsable slot loads as an
    /// empty history rather than an error.
    pub fn with_database(db: Database) -> Result<Self, StorageError> {
        let records = match db.kv_get(RECORDS_KEY)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_default(),
            None => Vec::new(),
        };
        Ok(Self { db, records })
    }

    /// Read-only snapshot, most-recent-first.
    pub fn list(&self) -> &[TaskRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validate and insert at the head.
    pub fn append(&mut self, record: TaskRecord) -> Result<()> {
        let record = record.normalized()?;
        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.push(record);
        next.extend(self.records.iter().cloned());
        self.commit(next)
    }

    /// Replace the record at `index`, preserving its position.
    pub fn update_at(&mut self, index: usize, record: TaskRecord) -> Result<()> {
        if index >= self.records.len() {
            return Err(CoreError::OutOfBounds {
                index,
                len: self.records.len(),
            });
        }
        let record = record.normalized()?;
        let mut next = self.records.clone();
        next[index] = record;
        self.commit(next)
    }

    /// Remove all given positions in one pass over the current snapshot.
    /// Membership filtering (rather than sequential splices) keeps the
    /// resolved indices stable while removing. Out-of-range indices are
    /// silently ignored.
    pub fn delete_many(&mut self, indices: &[usize]) -> Result<()> {
        let doomed: HashSet<usize> = indices.iter().copied().collect();
        let next: Vec<TaskRecord> = self
            .records
            .iter()
            .enumerate()
            .filter(|(i, _)| !doomed.contains(i))
            .map(|(_, record)| record.clone())
            .collect();
        self.commit(next)
    }

    /// Persist the full collection first, then swap it into memory, so a
    /// failed write leaves the in-memory view matching what is durably
    /// stored.
    fn commit(&mut self, next: Vec<TaskRecord>) -> Result<()> {
        let json = serde_json::to_string(&next)?;
        self.db.kv_set(RECORDS_KEY, &json)?;
        self.records = next;
        Ok(())
    }
}
