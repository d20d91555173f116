//! Builds persisted records from stopped sessions, manual input, and edits.

use crate::error::{Result, ValidationError};
use crate::format;
use crate::record::TaskRecord;
use crate::storage::RecordStore;
use crate::timer::ActiveSession;

/// Record for a session stopped at `end_epoch_ms`, taken verbatim from the
/// session fields. A stop within the starting millisecond is recorded as
/// 1 ms so the end-after-start invariant holds.
pub fn record_from_session(session: &ActiveSession, end_epoch_ms: u64) -> TaskRecord {
    let end_time = end_epoch_ms.max(session.start_epoch_ms + 1);
    TaskRecord {
        task_name: session.description.clone(),
        project: session.project.clone(),
        start_time: session.start_epoch_ms,
        end_time,
        duration_ms: end_time - session.start_epoch_ms,
    }
}

/// Record from manual input: editable local-minute time strings and an
/// optional project. Fails on an empty description, an unparsable
/// timestamp, or a start not strictly before the end.
pub fn manual_record(
    description: &str,
    project: Option<&str>,
    start: &str,
    end: &str,
) -> Result<TaskRecord, ValidationError> {
    let start_ms = format::parse_local_minute(start)
        .ok_or_else(|| ValidationError::UnparsableTimestamp(start.to_string()))?;
    let end_ms = format::parse_local_minute(end)
        .ok_or_else(|| ValidationError::UnparsableTimestamp(end.to_string()))?;
    TaskRecord::new(
        description,
        project.map(str::to_string),
        start_ms,
        end_ms,
    )
}

/// Replace the record at `index` with a freshly validated one built from
/// the same manual-input shape. The index refers to the snapshot the
/// caller last read.
pub fn apply_edit(
    store: &mut RecordStore,
    index: usize,
    description: &str,
    project: Option<&str>,
    start: &str,
    end: &str,
) -> Result<()> {
    let record = manual_record(description, project, start, end)?;
    store.update_at(index, record)
}
