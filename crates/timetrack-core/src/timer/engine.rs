//! Timer engine implementation.
//!
//! The engine is a wall-clock-based state machine. It does not use internal
//! threads - the caller (or a [`Ticker`](super::Ticker)) is responsible for
//! calling `tick()` periodically.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running(stopwatch | pomodoro) -> Idle
//! ```
//!
//! Stopwatch elapsed time is always derived from the absolute start instant,
//! never accumulated per tick, so missed or delayed ticks cannot drift the
//! display. Pomodoro remaining time is likewise derived from an absolute
//! per-phase deadline; crossing the deadline flips the phase and re-anchors
//! the next one at its full configured duration.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;
use crate::record::TaskRecord;
use crate::translator;

/// Default work phase length: 25 minutes.
pub const DEFAULT_WORK_MS: u64 = 25 * 60 * 1000;
/// Default break phase length: 5 minutes.
pub const DEFAULT_BREAK_MS: u64 = 5 * 60 * 1000;
/// Nominal tick period.
pub const TICK_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// Unbounded count-up timing.
    Stopwatch,
    /// Alternating work/break countdown timing.
    Pomodoro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn other(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    /// Notification payload announcing entry into this phase.
    pub fn notification(self) -> (&'static str, &'static str) {
        match self {
            Phase::Break => (
                "Time for a break!",
                "Great work! Take 5 minutes to recharge.",
            ),
            Phase::Work => ("Back to work!", "Break is over. Let's focus!"),
        }
    }
}

/// The transient record of a currently running session.
/// Fixed for the session's lifetime; owned exclusively by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSession {
    pub description: String,
    pub project: Option<String>,
    /// Epoch milliseconds captured at start.
    pub start_epoch_ms: u64,
    pub mode: TimerMode,
}

/// Countdown state, meaningful only while a pomodoro session runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroState {
    pub phase: Phase,
    /// Absolute instant (epoch ms) at which the current phase ends.
    pub deadline_epoch_ms: u64,
    pub work_duration_ms: u64,
    pub break_duration_ms: u64,
}

impl PomodoroState {
    pub fn remaining_ms(&self, now_epoch_ms: u64) -> u64 {
        self.deadline_epoch_ms.saturating_sub(now_epoch_ms)
    }

    fn duration_ms(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_duration_ms,
            Phase::Break => self.break_duration_ms,
        }
    }
}

/// Core timer engine.
///
/// Holds at most one [`ActiveSession`]. Serializable so a running session
/// survives process restarts when persisted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    session: Option<ActiveSession>,
    #[serde(default)]
    pomodoro: Option<PomodoroState>,
    #[serde(default = "default_work_ms")]
    work_duration_ms: u64,
    #[serde(default = "default_break_ms")]
    break_duration_ms: u64,
}

fn default_work_ms() -> u64 {
    DEFAULT_WORK_MS
}

fn default_break_ms() -> u64 {
    DEFAULT_BREAK_MS
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    /// Create an idle engine with the default 25/5 pomodoro durations.
    pub fn new() -> Self {
        Self::with_durations(DEFAULT_WORK_MS, DEFAULT_BREAK_MS)
    }

    pub fn with_durations(work_duration_ms: u64, break_duration_ms: u64) -> Self {
        Self {
            session: None,
            pomodoro: None,
            work_duration_ms,
            break_duration_ms,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ActiveSession> {
        self.session.as_ref()
    }

    pub fn pomodoro(&self) -> Option<&PomodoroState> {
        self.pomodoro.as_ref()
    }

    pub fn elapsed_ms(&self, now_epoch_ms: u64) -> u64 {
        self.session
            .as_ref()
            .map_or(0, |s| now_epoch_ms.saturating_sub(s.start_epoch_ms))
    }

    pub fn remaining_ms(&self, now_epoch_ms: u64) -> u64 {
        self.pomodoro
            .as_ref()
            .map_or(0, |p| p.remaining_ms(now_epoch_ms))
    }

    /// The display value: remaining time in a pomodoro phase, live elapsed
    /// time in stopwatch mode. Pure function of state, recomputed per read.
    pub fn display_ms(&self, now_epoch_ms: u64) -> u64 {
        match self.session.as_ref().map(|s| s.mode) {
            Some(TimerMode::Pomodoro) => self.remaining_ms(now_epoch_ms),
            Some(TimerMode::Stopwatch) => self.elapsed_ms(now_epoch_ms),
            None => 0,
        }
    }

    pub fn display_now_ms(&self) -> u64 {
        self.display_ms(now_ms())
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            running: self.is_running(),
            mode: self.session.as_ref().map(|s| s.mode),
            phase: self.pomodoro.as_ref().map(|p| p.phase),
            display_ms: self.display_now_ms(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a new session. Fails when the description is empty or a
    /// session is already active; the existing session is left untouched.
    pub fn start(
        &mut self,
        description: &str,
        project: Option<&str>,
        mode: TimerMode,
    ) -> Result<Event, ValidationError> {
        self.start_at(now_ms(), description, project, mode)
    }

    pub fn start_at(
        &mut self,
        now_epoch_ms: u64,
        description: &str,
        project: Option<&str>,
        mode: TimerMode,
    ) -> Result<Event, ValidationError> {
        if self.session.is_some() {
            return Err(ValidationError::SessionAlreadyActive);
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyField("task description"));
        }
        let project = project
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        self.session = Some(ActiveSession {
            description: description.to_string(),
            project: project.clone(),
            start_epoch_ms: now_epoch_ms,
            mode,
        });
        if mode == TimerMode::Pomodoro {
            self.pomodoro = Some(PomodoroState {
                phase: Phase::Work,
                deadline_epoch_ms: now_epoch_ms + self.work_duration_ms,
                work_duration_ms: self.work_duration_ms,
                break_duration_ms: self.break_duration_ms,
            });
        }
        Ok(Event::TimerStarted {
            description: description.to_string(),
            project,
            mode,
            at: Utc::now(),
        })
    }

    /// Call once per second while a session is active. Returns
    /// `Some(Event::PhaseSwitched)` when a pomodoro phase boundary passes.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    pub fn tick_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        let session = self.session.as_ref()?;
        if session.mode != TimerMode::Pomodoro {
            return None;
        }
        let pomodoro = self.pomodoro.as_mut()?;
        if now_epoch_ms < pomodoro.deadline_epoch_ms {
            return None;
        }
        // Edge-triggered flip: the new phase starts at its full configured
        // duration anchored at the instant the boundary was observed, with
        // no negative carry-over from a late tick.
        let next = pomodoro.phase.other();
        pomodoro.phase = next;
        pomodoro.deadline_epoch_ms = now_epoch_ms + pomodoro.duration_ms(next);
        let (title, body) = next.notification();
        Some(Event::PhaseSwitched {
            phase: next,
            title: title.to_string(),
            body: body.to_string(),
            at: Utc::now(),
        })
    }

    /// Stop the running session and return the candidate record (not yet
    /// persisted) together with the stop event. Returns `None` when idle,
    /// so a second call is a no-op.
    pub fn stop(&mut self) -> Option<(TaskRecord, Event)> {
        self.stop_at(now_ms())
    }

    pub fn stop_at(&mut self, now_epoch_ms: u64) -> Option<(TaskRecord, Event)> {
        let session = self.session.take()?;
        self.pomodoro = None;
        let record = translator::record_from_session(&session, now_epoch_ms);
        let event = Event::TimerStopped {
            description: record.task_name.clone(),
            project: record.project.clone(),
            duration_ms: record.duration_ms,
            at: Utc::now(),
        };
        Some((record, event))
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_750_000_000_000;
    const WORK: u64 = DEFAULT_WORK_MS;
    const BREAK: u64 = DEFAULT_BREAK_MS;

    fn started(mode: TimerMode) -> TimerEngine {
        let mut engine = TimerEngine::new();
        engine
            .start_at(T0, "Write report", Some("Acme"), mode)
            .unwrap();
        engine
    }

    #[test]
    fn start_then_stop_produces_record() {
        let mut engine = started(TimerMode::Stopwatch);
        let (record, event) = engine.stop_at(T0 + 90_000).unwrap();
        assert_eq!(record.task_name, "Write report");
        assert_eq!(record.project.as_deref(), Some("Acme"));
        assert_eq!(record.start_time, T0);
        assert_eq!(record.end_time, T0 + 90_000);
        assert_eq!(record.duration_ms, record.end_time - record.start_time);
        assert!(!engine.is_running());
        assert!(engine.pomodoro().is_none());
        match event {
            Event::TimerStopped {
                description,
                project,
                duration_ms,
                ..
            } => {
                assert_eq!(description, "Write report");
                assert_eq!(project.as_deref(), Some("Acme"));
                assert_eq!(duration_ms, 90_000);
            }
            other => panic!("expected TimerStopped, got {other:?}"),
        }
    }

    #[test]
    fn start_rejects_empty_description() {
        let mut engine = TimerEngine::new();
        assert!(matches!(
            engine.start_at(T0, "   ", None, TimerMode::Stopwatch),
            Err(ValidationError::EmptyField(_))
        ));
        assert!(!engine.is_running());
    }

    #[test]
    fn second_start_fails_and_leaves_session_untouched() {
        let mut engine = started(TimerMode::Stopwatch);
        let err = engine.start_at(T0 + 5_000, "Another", None, TimerMode::Pomodoro);
        assert!(matches!(err, Err(ValidationError::SessionAlreadyActive)));
        let session = engine.session().unwrap();
        assert_eq!(session.description, "Write report");
        assert_eq!(session.start_epoch_ms, T0);
        assert_eq!(session.mode, TimerMode::Stopwatch);
    }

    #[test]
    fn stop_is_idempotent_safe() {
        let mut engine = started(TimerMode::Stopwatch);
        assert!(engine.stop_at(T0 + 1_000).is_some());
        assert!(engine.stop_at(T0 + 2_000).is_none());
    }

    #[test]
    fn stop_within_start_millisecond_still_ends_after_start() {
        let mut engine = started(TimerMode::Stopwatch);
        let (record, _) = engine.stop_at(T0).unwrap();
        assert!(record.end_time > record.start_time);
        assert_eq!(record.duration_ms, record.end_time - record.start_time);
    }

    #[test]
    fn stopwatch_elapsed_derives_from_start_instant() {
        let mut engine = started(TimerMode::Stopwatch);
        assert_eq!(engine.elapsed_ms(T0 + 1_000), 1_000);
        engine.tick_at(T0 + 1_000);
        // Simulated clock jump: a missed tick cannot drift the reading.
        engine.tick_at(T0 + 60_000);
        assert_eq!(engine.elapsed_ms(T0 + 60_000), 60_000);
        assert!(engine.elapsed_ms(T0 + 61_000) >= engine.elapsed_ms(T0 + 60_000));
    }

    #[test]
    fn stopwatch_ticks_emit_no_events() {
        let mut engine = started(TimerMode::Stopwatch);
        assert!(engine.tick_at(T0 + 1_000).is_none());
        assert!(engine.tick_at(T0 + 10 * WORK).is_none());
    }

    #[test]
    fn pomodoro_cycles_work_break_work() {
        let mut engine = started(TimerMode::Pomodoro);
        assert_eq!(engine.remaining_ms(T0), WORK);
        assert!(engine.tick_at(T0 + WORK - 1_000).is_none());

        let flip = engine.tick_at(T0 + WORK).unwrap();
        match flip {
            Event::PhaseSwitched { phase, title, .. } => {
                assert_eq!(phase, Phase::Break);
                assert_eq!(title, "Time for a break!");
            }
            other => panic!("expected PhaseSwitched, got {other:?}"),
        }
        assert_eq!(engine.remaining_ms(T0 + WORK), BREAK);

        let flip = engine.tick_at(T0 + WORK + BREAK).unwrap();
        match flip {
            Event::PhaseSwitched { phase, title, .. } => {
                assert_eq!(phase, Phase::Work);
                assert_eq!(title, "Back to work!");
            }
            other => panic!("expected PhaseSwitched, got {other:?}"),
        }
        assert_eq!(engine.remaining_ms(T0 + WORK + BREAK), WORK);
    }

    #[test]
    fn late_tick_flips_without_negative_carry() {
        let mut engine = started(TimerMode::Pomodoro);
        // The tick arrives 7 seconds past the boundary.
        let now = T0 + WORK + 7_000;
        let flip = engine.tick_at(now).unwrap();
        assert!(matches!(
            flip,
            Event::PhaseSwitched {
                phase: Phase::Break,
                ..
            }
        ));
        // The new phase starts at its full duration, anchored at the flip.
        assert_eq!(engine.remaining_ms(now), BREAK);
    }

    #[test]
    fn display_selects_remaining_or_elapsed() {
        let mut stopwatch = started(TimerMode::Stopwatch);
        assert_eq!(stopwatch.display_ms(T0 + 5_000), 5_000);
        stopwatch.stop_at(T0 + 5_000).unwrap();
        assert_eq!(stopwatch.display_ms(T0 + 5_000), 0);

        let pomodoro = started(TimerMode::Pomodoro);
        assert_eq!(pomodoro.display_ms(T0 + 5_000), WORK - 5_000);
    }

    #[test]
    fn running_engine_round_trips_through_json() {
        let engine = started(TimerMode::Pomodoro);
        let json = serde_json::to_string(&engine).unwrap();
        let restored: TimerEngine = serde_json::from_str(&json).unwrap();
        let session = restored.session().unwrap();
        assert_eq!(session.description, "Write report");
        assert_eq!(session.start_epoch_ms, T0);
        assert_eq!(restored.remaining_ms(T0), WORK);
    }
}
