//! CSV export of the record history.

use chrono::{DateTime, Local, Utc};

use crate::format::format_hms;
use crate::record::TaskRecord;

/// Export header row.
pub const CSV_HEADER: &str = "Task Name,Project,Date,Start Time,End Time,Duration";

/// Render the history as CSV, one row per record in store order
/// (most-recent-first). Task name and project are always double-quoted
/// with internal quotes doubled; date and time fields use the observer's
/// local timezone; duration uses `HH:MM:SS`.
pub fn to_csv(records: &[TaskRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for record in records {
        let start = local_datetime(record.start_time);
        let end = local_datetime(record.end_time);
        lines.push(
            [
                quote(&record.task_name),
                quote(record.project.as_deref().unwrap_or_default()),
                start.format("%m/%d/%Y").to_string(),
                start.format("%H:%M:%S").to_string(),
                end.format("%H:%M:%S").to_string(),
                format_hms(record.duration_ms as i64),
            ]
            .join(","),
        );
    }
    lines.join("\n")
}

/// Dated export filename using the export moment's local date.
pub fn export_filename(at: DateTime<Local>) -> String {
    format!("time-tracker-export-{}.csv", at.format("%Y-%m-%d"))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn local_datetime(epoch_ms: u64) -> DateTime<Local> {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms as i64)
        .unwrap_or_default()
        .with_timezone(&Local)
}
