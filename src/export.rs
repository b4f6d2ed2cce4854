//! Bulk export of per-section series to CSV files.

use std::io::Write;
use std::path::{Path, PathBuf};

use csv::Writer;
use indicatif::ProgressBar;
use log::{debug, warn};
use rayon::prelude::*;

use crate::index::SectionEntry;
use crate::record::SectionKey;
use crate::series::{SeriesExtractor, SeriesResult};
use crate::store::RecordStore;

/// `<road>_<start>-<end>.csv`, with anything outside `[A-Za-z0-9.]` replaced.
pub fn section_file_name(entry: &SectionEntry) -> String {
    let clean = |s: String| -> String {
        s.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
            .collect()
    };
    format!(
        "{}_{}-{}.csv",
        clean(entry.road.clone()),
        clean(entry.start_junction.to_string()),
        clean(entry.end_junction.to_string())
    )
}

/// Writes `Year,<column>,...` rows, one per year of the first series. Gaps
/// are written as empty cells.
pub fn write_series_csv<W: Write>(out: W, series: &[SeriesResult]) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(out);

    let mut header = vec!["Year".to_string()];
    header.extend(series.iter().map(|s| s.column.clone()));
    wtr.write_record(&header)?;

    if let Some(first) = series.first() {
        for (i, year) in first.years.iter().enumerate() {
            let mut row = vec![year.to_string()];
            row.extend(series.iter().map(|s| {
                s.values
                    .get(i)
                    .copied()
                    .flatten()
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            }));
            wtr.write_record(&row)?;
        }
    }

    wtr.flush()?;
    Ok(())
}

fn export_section<S: AsRef<str>>(
    extractor: SeriesExtractor<'_>,
    entry: &SectionEntry,
    key: SectionKey,
    columns: &[S],
    dir: &Path,
) -> Result<Option<PathBuf>, csv::Error> {
    let series = extractor.extract_many(columns, key);
    if series.is_empty() {
        debug!("{} {}: no data", entry.road, entry.label());
        return Ok(None);
    }

    let path = dir.join(section_file_name(entry));
    let file = std::fs::File::create(&path)?;
    write_series_csv(file, &series)?;
    Ok(Some(path))
}

/// Exports every live, keyed catalog section under `dir`, sections in
/// parallel. Returns the paths written.
///
/// # Errors
///
/// * If `dir` cannot be created or any file cannot be written
pub fn export_all<S: AsRef<str> + Sync>(
    store: &RecordStore,
    columns: &[S],
    dir: &Path,
    pb: &ProgressBar,
) -> Result<Vec<PathBuf>, csv::Error> {
    std::fs::create_dir_all(dir)?;
    let extractor = SeriesExtractor::new(store);

    let sections: Vec<(&SectionEntry, SectionKey)> = store
        .index()
        .sections()
        .iter()
        .filter(|entry| !entry.is_dead())
        .filter_map(|entry| {
            if entry.key.is_none() {
                warn!("{} {}: no coordinates, skipping", entry.road, entry.label());
            }
            entry.key.map(|key| (entry, key))
        })
        .collect();
    pb.set_length(sections.len() as u64);

    let written: Vec<Option<PathBuf>> = sections
        .par_iter()
        .map(|(entry, key)| {
            let path = export_section(extractor, entry, *key, columns, dir);
            pb.inc(1);
            path
        })
        .collect::<Result<_, _>>()?;

    Ok(written.into_iter().flatten().collect())
}
