//! Completed task records.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A persisted, completed unit of tracked time.
///
/// Serialized with the wire field names the history slot uses
/// (`taskName`, `startTime`, ...). `duration_ms` is stored redundantly for
/// display convenience; every construction path recomputes it from the two
/// timestamps so it can never desynchronize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub task_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Epoch milliseconds.
    pub start_time: u64,
    /// Epoch milliseconds, strictly greater than `start_time`.
    pub end_time: u64,
    pub duration_ms: u64,
}

impl TaskRecord {
    /// Build a validated record. The task name must be non-empty and the
    /// end instant must lie strictly after the start; an empty or
    /// whitespace-only project collapses to "no project".
    pub fn new(
        task_name: impl Into<String>,
        project: Option<String>,
        start_time: u64,
        end_time: u64,
    ) -> Result<Self, ValidationError> {
        let task_name = task_name.into().trim().to_string();
        if task_name.is_empty() {
            return Err(ValidationError::EmptyField("task name"));
        }
        if end_time <= start_time {
            return Err(ValidationError::InvalidTimeRange {
                start: start_time,
                end: end_time,
            });
        }
        let project = project
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        Ok(Self {
            task_name,
            project,
            start_time,
            end_time,
            duration_ms: end_time - start_time,
        })
    }

    /// Re-validate and re-derive the duration from the timestamps.
    /// Store mutations pass records through here so hand-assembled or
    /// deserialized values cannot smuggle in a broken invariant.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Self::new(
            self.task_name.clone(),
            self.project.clone(),
            self.start_time,
            self.end_time,
        )
    }
}
