use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Phase, TimerMode};

/// Every state change in the timer engine produces an Event.
/// The display layer polls for snapshots; a notifier consumes phase switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        description: String,
        project: Option<String>,
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    /// Session ended. The produced record travels separately; this carries
    /// what a display or notifier needs to announce the stop.
    TimerStopped {
        description: String,
        project: Option<String>,
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    /// Pomodoro phase boundary crossed. `title`/`body` form the
    /// human-readable notification payload; delivery is the consumer's job.
    PhaseSwitched {
        phase: Phase,
        title: String,
        body: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        running: bool,
        mode: Option<TimerMode>,
        phase: Option<Phase>,
        /// Remaining time in a pomodoro phase, live elapsed otherwise.
        display_ms: u64,
        at: DateTime<Utc>,
    },
}
