//! Periodic tick scheduling for a running engine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use super::engine::{TimerEngine, TICK_MS};
use crate::events::Event;

/// Armed/disarmed handle over the single periodic tick source.
///
/// `arm` replaces any previously armed task and `disarm` aborts it, so at
/// most one tick source drives the engine at a time. Dropping the ticker
/// disarms it.
#[derive(Debug, Default)]
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self { handle: None }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Arm the periodic tick. The spawned task drives `engine.tick()` once
    /// per second, forwards emitted events to `events`, and exits on its
    /// own once the engine goes idle or the receiver is dropped.
    pub fn arm(&mut self, engine: Arc<Mutex<TimerEngine>>, events: mpsc::UnboundedSender<Event>) {
        self.disarm();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(TICK_MS));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let mut engine = engine.lock().await;
                if !engine.is_running() {
                    break;
                }
                if let Some(event) = engine.tick() {
                    if events.send(event).is_err() {
                        break;
                    }
                }
            }
        }));
    }

    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerMode;

    fn running_engine() -> Arc<Mutex<TimerEngine>> {
        let mut engine = TimerEngine::new();
        engine
            .start("Test task", None, TimerMode::Stopwatch)
            .unwrap();
        Arc::new(Mutex::new(engine))
    }

    #[tokio::test]
    async fn arm_and_disarm() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::new();
        assert!(!ticker.is_armed());

        ticker.arm(running_engine(), tx);
        assert!(ticker.is_armed());

        ticker.disarm();
        assert!(!ticker.is_armed());
    }

    #[tokio::test]
    async fn rearming_keeps_a_single_tick_source() {
        let engine = running_engine();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::new();
        ticker.arm(engine.clone(), tx.clone());
        ticker.arm(engine, tx);
        assert!(ticker.is_armed());
        ticker.disarm();
        assert!(!ticker.is_armed());
    }

    #[tokio::test]
    async fn task_exits_once_engine_is_idle() {
        let engine = Arc::new(Mutex::new(TimerEngine::new()));
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::new();
        ticker.arm(engine, tx);
        // First tick fires immediately, sees the idle engine, and exits.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!ticker.is_armed());
    }
}
