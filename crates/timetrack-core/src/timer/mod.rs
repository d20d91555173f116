mod engine;
mod ticker;

pub use engine::{
    ActiveSession, Phase, PomodoroState, TimerEngine, TimerMode, DEFAULT_BREAK_MS,
    DEFAULT_WORK_MS, TICK_MS,
};
pub use ticker::Ticker;
