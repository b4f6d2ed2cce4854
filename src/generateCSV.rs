use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::error;

use aadf_data::export::export_all;
use aadf_data::loader::load_store;
use aadf_data::{DataArgs, DEFAULT_COLUMNS};

/// Writes one CSV of yearly vehicle counts per catalogued road section.
#[derive(Parser)]
#[command(name = "generateData")]
struct Args {
    #[command(flatten)]
    data: DataArgs,

    /// Vehicle columns to export
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Output directory
    #[arg(long, default_value = "processed")]
    output_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let store = load_store(&args.data.data, args.data.schema(), true).map_err(|e| {
        error!("Error loading data: {e}");
        e
    })?;

    let columns: Vec<String> = if args.columns.is_empty() {
        DEFAULT_COLUMNS.iter().map(ToString::to_string).collect()
    } else {
        args.columns
    };

    let pb = ProgressBar::new(0);
    pb.set_message("Exporting sections...");
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} {wide_bar} {pos}/{len} ({eta})")
            .progress_chars("█▒░"),
    );

    let written = export_all(&store, &columns, &args.output_dir, &pb)?;
    pb.finish_with_message("Export complete.");

    println!(
        "Processed data for {} sections saved in '{}'.",
        written.len(),
        args.output_dir.display()
    );

    Ok(())
}
