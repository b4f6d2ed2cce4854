use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use aadf_data::chart::{caption_for, render_bar_chart};
use aadf_data::loader::load_store;
use aadf_data::{
    DataArgs, Dashboard, OsGridConverter, SeriesExtractor, Update, DEFAULT_COLUMNS,
};

/// Draws the vehicle-count bar chart for one road section.
#[derive(Parser)]
#[command(name = "generateGraph")]
struct Args {
    #[command(flatten)]
    data: DataArgs,

    /// Road name, e.g. "A30"
    #[arg(long)]
    road: String,

    /// Section label as listed by roadSections, e.g. "1 to 2"
    #[arg(long)]
    section: String,

    /// Vehicle columns to chart
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Output image
    #[arg(long, default_value = "section_chart.png")]
    output: PathBuf,

    /// Also print the chart data as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let store = match load_store(&args.data.data, args.data.schema(), true) {
        Ok(store) => store,
        Err(e) => {
            error!("Error loading data: {e}");
            return Err(e.into());
        }
    };

    let columns: Vec<String> = if args.columns.is_empty() {
        DEFAULT_COLUMNS.iter().map(ToString::to_string).collect()
    } else {
        args.columns.clone()
    };

    let mut dashboard = Dashboard::new(&store, OsGridConverter, &columns);
    dashboard.select_road(Some(&args.road));

    let Some(position) = dashboard
        .section_options()
        .iter()
        .position(|option| option.label == args.section)
    else {
        println!("No section '{}' on road '{}'.", args.section, args.road);
        return Ok(());
    };

    let mut map = None;
    if let Update::Redraw { map: centre, .. } = dashboard.select_section(position) {
        map = centre;
    }

    let mut chart = None;
    for column in &columns {
        if let Update::Redraw { chart: drawn, .. } = dashboard.toggle(column) {
            chart = drawn;
        }
    }

    let Some(chart) = chart else {
        println!("No data for the selected section.");
        return Ok(());
    };

    let key = dashboard.section_options()[position].key;
    let caption = key
        .and_then(|key| SeriesExtractor::new(&store).extract(&columns[0], key).ok())
        .map_or_else(|| args.road.clone(), |series| caption_for(&series));

    render_bar_chart(&args.output, &caption, &chart)?;
    info!("Chart written to {}", args.output.display());

    if args.json {
        println!("{}", chart.to_json()?);
    }

    if let Some(map) = map {
        println!(
            "Map centre: {:.6}, {:.6} (zoom {})",
            map.center.lat, map.center.lng, map.zoom
        );
    }

    println!("\nChart generated successfully.");
    Ok(())
}
