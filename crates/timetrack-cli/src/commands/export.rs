use std::path::PathBuf;

use chrono::Local;
use clap::Args;
use timetrack_core::export::{export_filename, to_csv};
use timetrack_core::storage::RecordStore;

#[derive(Args)]
pub struct ExportArgs {
    /// Write to this path instead of the default dated filename
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print the CSV to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

pub fn run(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = RecordStore::open()?;
    let csv = to_csv(store.list());

    if args.stdout {
        println!("{csv}");
        return Ok(());
    }

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(export_filename(Local::now())));
    std::fs::write(&path, csv)?;
    println!("wrote {} record(s) to {}", store.len(), path.display());
    Ok(())
}
