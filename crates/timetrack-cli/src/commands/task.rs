use chrono::{Duration, Local};
use clap::Subcommand;
use timetrack_core::format::{format_hms, to_local_minute};
use timetrack_core::storage::RecordStore;
use timetrack_core::translator;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a manual record with explicit start/end times
    Add {
        /// Task description
        description: String,
        /// Optional project tag
        #[arg(long)]
        project: Option<String>,
        /// Start time (YYYY-MM-DDTHH:MM, local). Defaults to one hour ago
        #[arg(long)]
        start: Option<String>,
        /// End time (YYYY-MM-DDTHH:MM, local). Defaults to now
        #[arg(long)]
        end: Option<String>,
    },
    /// Replace the record at the given index (most-recent-first)
    Edit {
        index: usize,
        description: String,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Delete records by index (most-recent-first)
    Delete { indices: Vec<usize> },
    /// List recorded tasks
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = RecordStore::open()?;

    match action {
        TaskAction::Add {
            description,
            project,
            start,
            end,
        } => {
            let now = Local::now();
            let start = start.unwrap_or_else(|| {
                to_local_minute((now - Duration::hours(1)).timestamp_millis() as u64)
            });
            let end = end.unwrap_or_else(|| to_local_minute(now.timestamp_millis() as u64));
            let record = translator::manual_record(&description, project.as_deref(), &start, &end)?;
            store.append(record.clone())?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        TaskAction::Edit {
            index,
            description,
            project,
            start,
            end,
        } => {
            translator::apply_edit(
                &mut store,
                index,
                &description,
                project.as_deref(),
                &start,
                &end,
            )?;
            println!("{}", serde_json::to_string_pretty(&store.list()[index])?);
        }
        TaskAction::Delete { indices } => {
            let before = store.len();
            store.delete_many(&indices)?;
            println!("deleted {} record(s), {} remain", before - store.len(), store.len());
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.list())?);
            } else if store.is_empty() {
                println!("no tasks recorded yet");
            } else {
                for (index, record) in store.list().iter().enumerate() {
                    println!(
                        "{index:>3}  {}  {}  {}  {}{}",
                        to_local_minute(record.start_time),
                        to_local_minute(record.end_time),
                        format_hms(record.duration_ms as i64),
                        record.task_name,
                        record
                            .project
                            .as_deref()
                            .map(|p| format!("  [{p}]"))
                            .unwrap_or_default(),
                    );
                }
                println!("{} task(s)", store.len());
            }
        }
    }

    Ok(())
}
