//! # timetrack core library
//!
//! Core business logic for timetrack, a local time-tracking tool: start a
//! named task, watch it count up (or count down through pomodoro work/break
//! phases), stop it into a persisted history that supports manual entries,
//! edits, multi-select deletion, and CSV export.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a wall-clock-based state machine; a caller (or the
//!   [`Ticker`]) invokes `tick()` once per second for phase switching
//! - **Storage**: SQLite key-value slots for the record history and the
//!   serialized engine, TOML-based configuration
//! - **Translator**: turns stopped sessions, manual input, and edits into
//!   validated records
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: session state machine and time computation
//! - [`RecordStore`]: most-recent-first persisted history
//! - [`Config`]: pomodoro durations and notification preferences

pub mod error;
pub mod events;
pub mod export;
pub mod format;
pub mod record;
pub mod storage;
pub mod suggest;
pub mod timer;
pub mod translator;

pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use events::Event;
pub use record::TaskRecord;
pub use storage::{Config, Database, RecordStore};
pub use timer::{ActiveSession, Phase, PomodoroState, Ticker, TimerEngine, TimerMode};
