use clap::Subcommand;
use timetrack_core::storage::RecordStore;
use timetrack_core::suggest::{filter_suggestions, project_suggestions, DEFAULT_SUGGESTION_LIMIT};

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List project suggestions derived from the history
    Suggest {
        /// Case-insensitive substring filter
        #[arg(long)]
        filter: Option<String>,
        /// Maximum number of distinct suggestions
        #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },
}

pub fn run(action: ProjectAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = RecordStore::open()?;

    match action {
        ProjectAction::Suggest { filter, limit } => {
            let mut suggestions = project_suggestions(store.list(), limit);
            if let Some(filter) = filter {
                suggestions = filter_suggestions(&suggestions, &filter);
            }
            for suggestion in suggestions {
                println!("{suggestion}");
            }
        }
    }

    Ok(())
}
