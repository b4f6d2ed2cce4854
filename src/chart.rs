//! Grouped bar chart rendering for one road section.

use std::error::Error;
use std::path::Path;

use chrono::Local;
use plotters::prelude::*;

use crate::series::{ChartData, SeriesResult};

/// Chart caption in the form `"<road>: <start> to <end>"`.
pub fn caption_for(series: &SeriesResult) -> String {
    format!(
        "{}: {} to {}",
        series.road, series.start_junction, series.end_junction
    )
}

/// Parses `#RRGGBB`. Anything else falls back to black.
pub fn hex_color(hex: &str) -> RGBColor {
    let parse = || -> Option<RGBColor> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
    };
    parse().unwrap_or(BLACK)
}

fn max_value(chart: &ChartData) -> f64 {
    chart
        .datasets
        .iter()
        .flat_map(|d| d.data.iter().flatten())
        .fold(0.0_f64, |acc, &v| acc.max(v))
}

/// Draws `chart` as a grouped bar chart: one group per year, one bar per
/// dataset, coloured by its dataset colour.
#[allow(clippy::cast_precision_loss)]
pub fn render_bar_chart(path: &Path, caption: &str, chart: &ChartData) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1600, 1200)).into_drawing_area();
    root.fill(&WHITE)?;

    let groups = chart.labels.len();
    let max_value = max_value(chart);
    let y_top = if max_value > 0.0 { max_value * 1.1 } else { 1.0 };

    let mut ctx = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 50))
        .margin(60)
        .x_label_area_size(100)
        .y_label_area_size(120)
        .build_cartesian_2d(-0.5..(groups as f64 - 0.5), 0.0..y_top)?;

    let labels = &chart.labels;
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(groups)
        .x_label_formatter(&|x| {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let idx = idx as usize;
            labels.get(idx).cloned().unwrap_or_default()
        })
        .x_desc("Year")
        .y_desc("Annual average daily flow")
        .label_style(("sans-serif", 30))
        .draw()?;

    let per_group = chart.datasets.len().max(1) as f64;
    let bar_width = 0.8 / per_group;

    for (j, dataset) in chart.datasets.iter().enumerate() {
        let color = hex_color(&dataset.background_color);
        let offset = -0.4 + j as f64 * bar_width;

        ctx.draw_series(dataset.data.iter().enumerate().filter_map(|(i, value)| {
            let value = (*value)?;
            let left = i as f64 + offset;
            Some(Rectangle::new(
                [(left, 0.0), (left + bar_width, value)],
                color.filled(),
            ))
        }))?
        .label(dataset.label.clone())
        .legend(move |(x, y)| Rectangle::new([(x, y - 8), (x + 16, y + 8)], color.filled()));
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 30))
        .draw()?;

    root.draw(&Text::new(
        format!("Generated {}", Local::now().format("%Y-%m-%d")),
        (20, 1170),
        ("sans-serif", 20).into_font().color(&BLACK),
    ))?;
    root.present()?;

    Ok(())
}
