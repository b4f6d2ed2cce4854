use std::error::Error;

use clap::Parser;
use log::error;

use aadf_data::loader::load_store;
use aadf_data::{DataArgs, Dashboard, OsGridConverter, DEFAULT_COLUMNS};

/// Lists the roads in the dataset, or the selectable sections of one road.
#[derive(Parser)]
#[command(name = "roadSections")]
struct Args {
    #[command(flatten)]
    data: DataArgs,

    /// Road to list sections for; omit to list roads
    road: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let store = load_store(&args.data.data, args.data.schema(), true).map_err(|e| {
        error!("Error loading data: {e}");
        e
    })?;

    let mut dashboard = Dashboard::new(&store, OsGridConverter, DEFAULT_COLUMNS);

    let Some(road) = args.road else {
        for road in dashboard.roads() {
            println!("{road}");
        }
        println!("\n{} road(s)", dashboard.roads().len());
        return Ok(());
    };

    dashboard.select_road(Some(&road));
    let options = &dashboard.section_options()[1..];
    if options.is_empty() {
        println!("No sections found for '{road}'.");
        return Ok(());
    }

    println!("{:<24} {:>10} {:>10}", "SECTION", "EASTING", "NORTHING");
    println!("{}", "-".repeat(46));
    for option in options {
        match option.key {
            Some(key) => println!("{:<24} {:>10} {:>10}", option.label, key.easting, key.northing),
            None => println!("{:<24} {:>10} {:>10}", option.label, "-", "-"),
        }
    }

    Ok(())
}
