use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::{Subcommand, ValueEnum};
use timetrack_core::format::format_hms;
use timetrack_core::storage::{Config, Database, RecordStore};
use timetrack_core::timer::{Ticker, TimerEngine, TimerMode};
use timetrack_core::Event;
use tokio::sync::{mpsc, Mutex};

const ENGINE_KEY: &str = "timer_engine";

#[derive(Clone, Copy, ValueEnum)]
pub enum Mode {
    Stopwatch,
    Pomodoro,
}

impl From<Mode> for TimerMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Stopwatch => TimerMode::Stopwatch,
            Mode::Pomodoro => TimerMode::Pomodoro,
        }
    }
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a new session
    Start {
        /// Task description
        description: String,
        /// Optional project tag
        #[arg(long)]
        project: Option<String>,
        /// Timer mode
        #[arg(long, value_enum, default_value = "stopwatch")]
        mode: Mode,
    },
    /// Stop the running session and record it to the history
    Stop,
    /// Print current timer state as JSON
    Status,
    /// Run in the foreground, updating the display once per second
    Watch,
}

fn load_engine(db: &Database, config: &Config) -> TimerEngine {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_str::<TimerEngine>(&json) {
            return engine;
        }
    }
    TimerEngine::with_durations(config.pomodoro.work_ms(), config.pomodoro.break_ms())
}

fn save_engine(db: &Database, engine: &TimerEngine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let mut engine = load_engine(&db, &config);

    match action {
        TimerAction::Start {
            description,
            project,
            mode,
        } => {
            let event = engine.start(&description, project.as_deref(), mode.into())?;
            save_engine(&db, &engine)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Stop => match engine.stop() {
            Some((record, event)) => {
                let mut store = RecordStore::open()?;
                store.append(record)?;
                save_engine(&db, &engine)?;
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            None => {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
        },
        TimerAction::Status => {
            let event = engine.tick();
            save_engine(&db, &engine)?;
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            if let Some(event) = event {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        TimerAction::Watch => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(watch(db, config, engine))?;
        }
    }

    Ok(())
}

/// Foreground loop: arm the tick source, redraw the display each second,
/// print phase-switch notifications, and persist the engine on exit.
async fn watch(
    db: Database,
    config: Config,
    engine: TimerEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    if !engine.is_running() {
        println!("no active session");
        return Ok(());
    }

    let engine = Arc::new(Mutex::new(engine));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut ticker = Ticker::new();
    ticker.arm(engine.clone(), tx);

    let mut display = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = display.tick() => {
                let engine = engine.lock().await;
                if !engine.is_running() {
                    break;
                }
                print!("\r{}  ", format_hms(engine.display_now_ms() as i64));
                std::io::stdout().flush()?;
            }
            event = rx.recv() => {
                match event {
                    Some(Event::PhaseSwitched { title, body, .. }) => {
                        if config.notifications.enabled {
                            println!("\n{title} {body}");
                        }
                    }
                    Some(_) => {}
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    ticker.disarm();
    let engine = engine.lock().await;
    save_engine(&db, &engine)?;
    Ok(())
}
